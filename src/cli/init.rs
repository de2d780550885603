//! Init command - write an example config file

use anyhow::Result;
use console::style;
use ngender::NGenderConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let (config_path, created) = match path {
        Some(path) => (path.to_path_buf(), NGenderConfig::write_example(path)?),
        None => {
            let config_path = NGenderConfig::user_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
            let created = !config_path.exists();
            NGenderConfig::init_user_config()?;
            (config_path, created)
        }
    };

    if created {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Already exists: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }
    Ok(())
}
