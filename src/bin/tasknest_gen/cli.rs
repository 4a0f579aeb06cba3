use std::path::PathBuf;

use clap::Parser;
use tasknest::bin_constants::DEFAULT_CONFIG_FILE;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Write a starter configuration file instead of hashing a password.
    #[arg(long, default_value_t = false)]
    pub init_config: bool,

    #[arg(long, short = 'y', default_value_t = false)]
    pub no_repeat: bool,
}
