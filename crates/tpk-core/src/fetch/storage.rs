//! Writing downloaded bodies to disk.
//!
//! The body goes to `<dest>.part` first and is renamed into place, so an
//! existing destination is always a complete download.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `toc.xml` → `toc.xml.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `body` to `final_path`, creating parent directories as needed.
pub fn write_atomic(final_path: &Path, body: &[u8]) -> Result<(), FetchError> {
    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent).map_err(err(parent))?;
    }

    let tp = temp_path(final_path);
    {
        let mut file = fs::File::create(&tp).map_err(err(&tp))?;
        file.write_all(body).map_err(err(&tp))?;
        file.sync_all().map_err(err(&tp))?;
    }
    fs::rename(&tp, final_path).map_err(err(final_path))?;
    Ok(())
}

fn err(path: &Path) -> impl FnOnce(std::io::Error) -> FetchError {
    let path = path.to_path_buf();
    move |source| FetchError::Write { path, source }
}
