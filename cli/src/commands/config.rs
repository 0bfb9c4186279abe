use super::load_config;
use anyhow::Result;
use std::path::Path;

pub fn handle_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, None)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
