use async_trait::async_trait;
use log::error;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use time::Duration;

use tasknest::config::AppConfig;
use tasknest::hasher::ProductionHasher;
use tasknest::rng::SyncRng;
use tasknest::session_storage::ProductionSessionStorage;
use tasknest::storage::DocumentStorage;
use tasknest::user_db::ProductionUserDb;

use crate::access_granter::AccessGranter;
use crate::routes::{ApiRocketBuildExt, WebRocketBuildExt};

pub struct AppSetupFairing;

impl AppSetupFairing {
    pub fn new() -> Self {
        AppSetupFairing
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let app_config: AppConfig = ok_or_bail!(
            rocket,
            rocket.figment().extract(),
            |e| error!("failed to load config: {e}")
        );

        let hasher_params = ok_or_bail!(
            rocket,
            app_config.hasher.clone().try_into(),
            |e| error!("hasher config is invalid: {e}")
        );

        let rng = SyncRng::from_entropy();

        let storage = ok_or_bail!(
            rocket,
            DocumentStorage::new(&app_config.data_directory).await,
            |e| error!("document storage initialization failed: {e}")
        );

        let hasher = ProductionHasher::new(hasher_params, rng.clone());
        let user_db = ok_or_bail!(
            rocket,
            ProductionUserDb::load(&app_config.user_db, hasher).await,
            |e| error!("user db loading failed: {e}")
        );

        let session_storage = ok_or_bail!(
            rocket,
            ProductionSessionStorage::new(
                &app_config.session_file,
                rng.clone(),
            ).await,
            |e| error!("session storage initialization failed: {e}")
        );

        let session_ttl = ok_or_bail!(
            rocket,
            i64::try_from(app_config.session_ttl_minutes),
            |e| error!("session ttl out of range: {e}")
        );
        let access_granter = AccessGranter::new(
            Box::new(session_storage),
            Box::new(user_db),
            Duration::minutes(session_ttl),
        );

        Ok(
            rocket
                .manage(storage)
                .manage(access_granter)
                .manage(rng)
                .install_tasknest_api()
                .install_tasknest_web()
        )
    }
}
