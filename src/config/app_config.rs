use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bin_constants::{
    DEFAULT_DATA_DIR, DEFAULT_SESSION_FILE, DEFAULT_USER_DB,
};
use crate::config::hasher_config::HasherConfigData;
use crate::lib_constants::DEFAULT_SESSION_TTL_MINUTES;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_data_directory")]
    pub data_directory: PathBuf,

    #[serde(default = "app_config_default_user_db")]
    pub user_db: PathBuf,

    #[serde(default = "app_config_default_session_file")]
    pub session_file: PathBuf,

    #[serde(default = "app_config_default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,

    #[serde(default)]
    pub hasher: HasherConfigData,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: app_config_default_data_directory(),
            user_db: app_config_default_user_db(),
            session_file: app_config_default_session_file(),
            session_ttl_minutes: app_config_default_session_ttl_minutes(),
            hasher: HasherConfigData::default(),
        }
    }
}

pub fn app_config_default_data_directory() -> PathBuf {
    DEFAULT_DATA_DIR.into()
}

pub fn app_config_default_user_db() -> PathBuf {
    DEFAULT_USER_DB.into()
}

pub fn app_config_default_session_file() -> PathBuf {
    DEFAULT_SESSION_FILE.into()
}

pub fn app_config_default_session_ttl_minutes() -> u64 {
    DEFAULT_SESSION_TTL_MINUTES
}
