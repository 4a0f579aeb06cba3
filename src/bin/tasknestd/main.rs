mod access_granter;
mod app_constants;
mod app_setup;
mod cli;
mod routes;

use clap::{crate_name, Parser};
use log::info;
use rocket::figment::Figment;
use tasknest::config::figment::FigmentExt;
use tasknest::error_exit;
use tasknest::logging::init_logging;

use crate::app_setup::AppSetupFairing;
use crate::cli::CliConfig;

fn main() {
    init_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(cli_config.config_file);

    let result = rocket::execute(
        rocket
            ::custom(figment)
            .attach(AppSetupFairing::new())
            .launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
