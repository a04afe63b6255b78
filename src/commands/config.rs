// commands/config.rs — Show and initialise the operator configuration.

use std::path::Path;

use crate::atoms::types::FactoryConfig;
use crate::commands::fail;
use crate::engine::config;

/// Effective configuration as TOML, with the API key masked.
pub fn show_config(cfg: &FactoryConfig) -> Result<String, String> {
    let body = config::render_config(cfg, false).map_err(fail("config"))?;
    Ok(format!(
        "# api_key: {}\n# base_url: {}\n{}",
        cfg.provider.masked_api_key(),
        cfg.provider.resolved_base_url(),
        body
    ))
}

pub fn init_config(path: &Path) -> Result<(), String> {
    config::init_config(path).map_err(fail("config"))
}
