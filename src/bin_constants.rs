pub const DEFAULT_CONFIG_FILE: &str = "/etc/tasknest/tasknest.toml";
pub const DEFAULT_USER_DB: &str = "/etc/tasknest/users.toml";
pub const DEFAULT_DATA_DIR: &str = "/var/tasknest";
pub const DEFAULT_SESSION_FILE: &str = "/var/tasknest/sessions.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "TASKNEST_";
