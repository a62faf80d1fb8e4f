use super::constants::UTXO_TRACKER_ROOT_DIR;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_DIR_NAME: &str = "logs";

// ~/.utxo-tracker, or ./.utxo-tracker when there is no home directory
pub fn get_root_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(UTXO_TRACKER_ROOT_DIR)
}

pub fn get_service_dir(service_name: &str) -> PathBuf {
    get_root_dir().join(service_name)
}

pub fn get_log_dir(service_name: &str) -> PathBuf {
    get_service_dir(service_name).join(LOG_DIR_NAME)
}

pub fn get_config_file(service_dir: &std::path::Path) -> PathBuf {
    service_dir.join(CONFIG_FILE_NAME)
}
