use clap::Parser;
use log::warn;
use rocket::figment::Figment;
use rpassword::prompt_password;

use tasknest::config::figment::FigmentExt;
use tasknest::config::AppConfig;
use tasknest::error_exit;
use tasknest::hasher::{Hasher, ProductionHasher};
use tasknest::rng::SyncRng;

use crate::cli::CliConfig;

mod cli;
mod config;
mod file_write;

fn main() {
    env_logger::init();

    let cli_config = CliConfig::parse();

    if cli_config.init_config {
        config::write_initial_config(&cli_config.config_file)
            .unwrap_or_else(|e|
                error_exit!("could not write the config file: {e}")
            );
        println!("wrote {}", cli_config.config_file.display());
        return;
    }

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }

    let app_config: AppConfig = Figment::new()
        .setup_app_config(&cli_config.config_file)
        .extract()
        .unwrap_or_else(|e| error_exit!("failed to load config: {e}"));

    generate_hash(cli_config, app_config)
}

fn generate_hash(
    cli_config: CliConfig,
    app_config: AppConfig,
) {
    let hasher_params = app_config.hasher.try_into()
        .unwrap_or_else(|e| error_exit!("hasher config is invalid: {}", e));
    let hasher = ProductionHasher::new(hasher_params, SyncRng::from_entropy());

    let read_value = prompt_password("Enter the password: ")
        .unwrap_or_else(|e| error_exit!("could not read password: {}", e));
    if read_value.is_empty() {
        error_exit!("entered password is empty")
    }

    if !cli_config.no_repeat {
        let confirmation_value = prompt_password("Repeat the password: ")
            .unwrap_or_else(|e| error_exit!("could not read password: {}", e));
        if confirmation_value != read_value {
            error_exit!("the passwords do not match")
        }
    }

    if read_value.trim() != read_value {
        warn!("the password has leading or trailing whitespace characters");
    }

    let hash = hasher.generate_hash(&read_value)
        .unwrap_or_else(|e| error_exit!("could not generate hash: {}", e));
    println!("{}", hash);
}
