pub mod api;
pub mod web;

use rocket::{Build, Rocket};

use crate::app_constants::{API_MOUNT_POINT, WEB_MOUNT_POINT};

pub trait ApiRocketBuildExt {
    fn install_tasknest_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_tasknest_api(self) -> Self {
        self.mount(API_MOUNT_POINT, api::api_routes())
            .register(API_MOUNT_POINT, api::api_catchers())
    }
}

pub trait WebRocketBuildExt {
    fn install_tasknest_web(self) -> Self;
}

impl WebRocketBuildExt for Rocket<Build> {
    fn install_tasknest_web(self) -> Self {
        self.mount(WEB_MOUNT_POINT, web::web_routes())
    }
}
