use serde::{Deserialize, Serialize};
use std::path::Path;
use utxo_util::{GatewayConfig, get_config_file};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl TrackerConfig {
    pub fn load(root_dir: &Path) -> Result<Self, String> {
        let path = get_config_file(root_dir);
        if !path.exists() {
            let default_config = TrackerConfig::default();
            info!(
                "Config file {} does not exist. Using default configuration.",
                path.display()
            );
            info!(
                "Default config: {}",
                toml::to_string_pretty(&default_config).unwrap_or_default()
            );
            Ok(default_config)
        } else {
            info!("Loading config from {}", path.display());
            let config_data = std::fs::read_to_string(&path).map_err(|e| {
                let msg = format!("Failed to read config file {}: {}", path.display(), e);
                error!("{}", msg);
                msg
            })?;

            Self::from_toml(&config_data).map_err(|e| {
                let msg = format!("Failed to parse config file {}: {}", path.display(), e);
                error!("{}", msg);
                msg
            })
        }
    }

    pub fn from_toml(data: &str) -> Result<Self, String> {
        toml::from_str(data).map_err(|e| e.to_string())
    }
}
