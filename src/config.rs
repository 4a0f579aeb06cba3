pub mod app_config;
pub mod figment;
pub mod hasher_config;

pub use app_config::AppConfig;
pub use hasher_config::HasherConfigData;
