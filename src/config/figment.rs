use std::path::Path;

use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};

use crate::bin_constants::APP_CONFIG_ENV_PREFIX;
use crate::config::app_config::AppConfig;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file_exact(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn file_overrides_defaults_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "tasknest.toml",
                r#"
                    data_directory = "/srv/tasknest-data"
                    session_ttl_minutes = 120
                "#,
            )?;
            jail.set_env("TASKNEST_SESSION_TTL_MINUTES", "15");

            let config: AppConfig = Figment::new()
                .setup_app_config("tasknest.toml")
                .extract()?;
            assert_eq!(
                config.data_directory.to_str(),
                Some("/srv/tasknest-data"),
            );
            assert_eq!(config.session_ttl_minutes, 15);
            assert_eq!(config.user_db, AppConfig::default().user_db);
            Ok(())
        });
    }
}
