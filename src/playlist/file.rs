//! Source and destination file access.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{IoResultExt, Result};

/// Read the whole source playlist as text.
pub fn read_source(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).at_path(path)?;
    tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
    Ok(contents)
}

/// Write `contents` to `path` without ever exposing a partial file.
///
/// The data goes to a sibling temp file first and is then renamed over
/// the destination. The temp file name carries the process id and is
/// created exclusively, so an existing file is never clobbered. The temp
/// file is removed if either step fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_new(&temp_path, contents)
        .at_path(&temp_path)
        .and_then(|()| fs::rename(&temp_path, path).at_path(path));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        tracing::info!("Wrote {} bytes to {:?}", contents.len(), path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(temp_name)
}

fn write_new(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
