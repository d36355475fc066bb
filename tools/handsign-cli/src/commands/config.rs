//! Show or initialize the configuration file.

use handsign_common::config::{config_file_path, AppConfig};

pub fn run(write: bool) -> anyhow::Result<()> {
    if write {
        let path = AppConfig::default()
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let path = config_file_path();
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not present, showing defaults)", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&AppConfig::load())?);
    Ok(())
}
