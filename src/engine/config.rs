// Brand Factory Engine — Operator Configuration
// TOML file at ~/.config/brandfactory/config.toml (platform config dir).
// A missing file means defaults; a broken file is an error, never silently
// ignored. The API key may come from the environment instead of the file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::atoms::constants::API_KEY_ENV;
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::FactoryConfig;

/// Platform config location, e.g. `~/.config/brandfactory/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("brandfactory").join("config.toml"))
}

/// Parse TOML text. Unknown keys are ignored; missing keys take defaults.
pub fn parse_config(content: &str) -> EngineResult<FactoryConfig> {
    toml::from_str::<FactoryConfig>(content)
        .map_err(|e| EngineError::config(format!("TOML parse error: {e}")))
}

/// Fill an empty `provider.api_key` from the environment.
fn apply_env(config: &mut FactoryConfig) {
    if config.provider.api_key.trim().is_empty() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.provider.api_key = key.trim().to_string();
            }
        }
    }
}

/// Load from `path`, or from the default location when `None`.
pub fn load_config(path: Option<&Path>) -> EngineResult<FactoryConfig> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => {
            warn!("[config] no config directory on this platform; using defaults");
            let mut config = FactoryConfig::default();
            apply_env(&mut config);
            return Ok(config);
        }
    };

    let mut config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        let config = parse_config(&content).map_err(|e| match e {
            EngineError::Config(msg) => EngineError::config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        info!("[config] loaded {}", path.display());
        config
    } else {
        info!("[config] {} not found; using defaults", path.display());
        FactoryConfig::default()
    };
    apply_env(&mut config);
    Ok(config)
}

/// Render a config as TOML. The API key is left out unless `with_key`.
pub fn render_config(config: &FactoryConfig, with_key: bool) -> EngineResult<String> {
    let mut config = config.clone();
    if !with_key {
        config.provider.api_key.clear();
    }
    toml::to_string_pretty(&config).map_err(|e| EngineError::config(format!("TOML write error: {e}")))
}

/// Write a starter config file. Refuses to overwrite an existing one.
pub fn init_config(path: &Path) -> EngineResult<()> {
    if path.exists() {
        return Err(EngineError::config(format!("{} already exists", path.display())));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_config(&FactoryConfig::default(), false)?)?;
    info!("[config] wrote {}", path.display());
    Ok(())
}
