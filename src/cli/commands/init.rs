use anyhow::Result;

use crate::infrastructure::bootstrap::{
    create_config_dir, create_config_file, create_sample_corpus, SetupPaths,
};

/// Handle the init command: write the default config and sample corpus.
pub async fn execute(force: bool, json: bool) -> Result<()> {
    let paths = SetupPaths::new()?;

    if paths.is_initialized() && !force {
        if json {
            println!("{}", serde_json::json!({ "initialized": false, "reason": "already initialized" }));
        } else {
            println!("Teller is already initialized. Use --force to overwrite.");
        }
        return Ok(());
    }

    create_config_dir(&paths)?;
    create_config_file(&paths, force)?;
    create_sample_corpus(&paths, force)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "initialized": true,
                "config_file": paths.config_file.display().to_string(),
                "data_file": paths.data_file.display().to_string(),
            })
        );
    } else {
        println!("Initialized Teller:");
        println!("  config: {}", paths.config_file.display());
        println!("  corpus: {}", paths.data_file.display());
        println!("\nEdit the corpus, then run `teller reload` to build the index.");
    }

    Ok(())
}
