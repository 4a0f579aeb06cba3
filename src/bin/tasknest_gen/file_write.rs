use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;

#[cfg(unix)] use std::os::unix::fs::OpenOptionsExt;

/// Creates the file with the requested mode before any content lands in
/// it, so a config with secrets is never world-readable mid-write.
pub fn write(
    path: &Path,
    contents: impl AsRef<str>,
    mode: Option<u32>,
) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options
        .read(false)
        .write(true)
        .create_new(true);
    #[cfg(unix)]
    if let Some(mode) = mode {
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    let mut file = options.open(path)?;
    file.write_all(contents.as_ref().as_bytes())?;
    Ok(())
}
