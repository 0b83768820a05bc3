//! Location of the persisted profile store.

use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Folder under the home directory holding Falcon CLI state.
pub const CONFIG_DIR_NAME: &str = ".falcon";
/// File name of the profile store inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// Environment variable overriding the profile store location.
pub const CONFIG_PATH_ENV: &str = "FALCON_CONFIG";

/// Where the store path came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePathSource {
    Flag,
    Env,
    Home,
}

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Resolve the profile store path in the order: `--config` → `FALCON_CONFIG` → `$HOME/.falcon/config.yaml`.
///
/// Relative paths are anchored at the current directory.
pub fn resolve_store_path(
    flag: Option<&Path>,
    env_value: Option<&str>,
) -> io::Result<(PathBuf, StorePathSource)> {
    resolve_store_path_from(flag, env_value, dirs::home_dir())
}

/// Resolve the store path from explicit inputs (testable helper).
fn resolve_store_path_from(
    flag: Option<&Path>,
    env_value: Option<&str>,
    home: Option<PathBuf>,
) -> io::Result<(PathBuf, StorePathSource)> {
    let (path, source) = if let Some(path) = flag.filter(|p| !p.as_os_str().is_empty()) {
        (path.to_path_buf(), StorePathSource::Flag)
    } else if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        (PathBuf::from(value.trim()), StorePathSource::Env)
    } else {
        let home = home.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine the home directory; pass --config or set FALCON_CONFIG",
            )
        })?;
        (
            home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            StorePathSource::Home,
        )
    };

    if is_nonempty_absolute(&path) {
        return Ok((path, source));
    }
    Ok((env::current_dir()?.join(path), source))
}
