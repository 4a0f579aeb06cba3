use std::io;
use std::path::Path;

use tasknest::config::AppConfig;

use crate::file_write;

const CONFIG_FILE_MODE: u32 = 0o600;

pub fn write_initial_config(path: &Path) -> io::Result<()> {
    if path.exists() {
        return Err(
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )
        );
    }
    let serialized = toml::to_string_pretty(&AppConfig::default())
        .map_err(io::Error::other)?;
    file_write::write(path, serialized, Some(CONFIG_FILE_MODE))
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;

    use super::*;

    #[test]
    fn written_config_parses_back_to_the_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasknest.toml");
        write_initial_config(&path).unwrap();
        let parsed: AppConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasknest.toml");
        write_initial_config(&path).unwrap();
        let err = write_initial_config(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
