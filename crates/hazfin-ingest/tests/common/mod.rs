//! Shared fixture helpers for ingestion tests
#![allow(dead_code)]

use std::path::Path;

/// Write the full nine-file fixture set describing finish code BP27:
/// substrate "B" + finish "P" + seq 27, two ordered steps, each linked to
/// one material with named chemicals.
pub fn write_fixture_csvs(dir: &Path) {
    write(
        dir,
        "substrates.csv",
        "code,description,source_doc\n\
         B,Beryllium copper alloy,LMA-PJ100\n",
    );

    write(
        dir,
        "finish_applied.csv",
        "code,description,associated_specs\n\
         P,Electroless nickel plate,\"AMS 2404, MIL-C-26074\"\n",
    );

    write(
        dir,
        "sft_steps.csv",
        "sft_code,description,parent_group,associated_specs\n\
         SFT0001,Alkaline clean and rinse,cleaning,MIL-S-5002\n\
         SFT0002,Electroless nickel deposition,plating,AMS 2404\n",
    );

    write(
        dir,
        "finish_codes.csv",
        "finish_code,substrate_code,finish_applied_code,seq_id,description\n\
         BP27,B,P,27,Electroless nickel over beryllium copper\n",
    );

    write(
        dir,
        "finish_code_steps.csv",
        "finish_code,sft_code,step_order\n\
         BP27,SFT0001,1\n\
         BP27,SFT0002,2\n",
    );

    write(
        dir,
        "materials_map.csv",
        "base_spec,variant,description\n\
         M-100,,Alkaline cleaner concentrate\n\
         M-200,REV-B,Electroless nickel solution\n",
    );

    write(
        dir,
        "chemicals.csv",
        "name,cas,hazard_flags,default_hazard_level\n\
         Chromium trioxide,1333-82-0,\"{\"\"codes\"\": [\"\"H350\"\"], \"\"categories\"\": [\"\"carcinogen\"\"], \"\"signal_word\"\": \"\"Danger\"\"}\",5\n\
         Nickel sulfate,7786-81-4,\"{\"\"codes\"\": [\"\"H317\"\"], \"\"categories\"\": [\"\"sensitizer\"\"]}\",4\n\
         Sodium hydroxide,1310-73-2,,3\n",
    );

    write(
        dir,
        "sft_material_links.csv",
        "sft_code,base_spec,variant,note\n\
         SFT0001,M-100,,Used at 60C\n\
         SFT0002,M-200,REV-B,\n",
    );

    write(
        dir,
        "material_chemicals.csv",
        "base_spec,variant,cas,pct_wt_low,pct_wt_high,notes\n\
         M-100,,1310-73-2,5,10,\n\
         M-100,,1333-82-0,1,3,trace etchant\n\
         M-200,REV-B,7786-81-4,20,30,\n",
    );
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}
