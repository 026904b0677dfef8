//! Storage locations for per-user key directories.

use std::path::PathBuf;

use crate::domain::error::{KeyStoreError, XdockerError};
use crate::domain::keyname::validate_username;

/// Environment override for the storage root.
pub const STORAGE_ROOT_ENV: &str = "XDOCKER_HOME";

/// Directory under `$HOME` used when no override is set.
pub const STORAGE_ROOT_DIRNAME: &str = ".xdocker";

/// Root under which all user key directories live: `$XDOCKER_HOME` when
/// set, otherwise `~/.xdocker`.
///
/// # Errors
///
/// Returns `KeyStoreError::NoStorageRoot` when neither is available.
pub fn storage_root() -> Result<PathBuf, KeyStoreError> {
    if let Some(root) = std::env::var_os(STORAGE_ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    dirs::home_dir()
        .map(|home| home.join(STORAGE_ROOT_DIRNAME))
        .ok_or(KeyStoreError::NoStorageRoot)
}

/// Key directory for one user: `<storage root>/<username>`. Nothing is
/// created.
///
/// # Errors
///
/// Returns `ValidationError::InvalidUsername` for a path-unsafe username,
/// `KeyStoreError::NoStorageRoot` when no root exists.
pub fn user_directory(username: &str) -> Result<PathBuf, XdockerError> {
    validate_username(username)?;
    Ok(storage_root()?.join(username))
}

/// Create the user's key directory if missing, mode 700 on Unix.
///
/// The key store itself never creates directories; callers that want the
/// directory bootstrapped do it through here before saving.
///
/// # Errors
///
/// As [`user_directory`], plus `KeyStoreError::Io` when creation fails.
pub fn ensure_user_directory(username: &str) -> Result<PathBuf, XdockerError> {
    let dir = user_directory(username)?;
    std::fs::create_dir_all(&dir).map_err(|source| KeyStoreError::Io {
        path: dir.clone(),
        source,
    })?;
    set_permissions(&dir, 0o700)?;
    Ok(dir)
}

#[cfg(unix)]
pub(crate) fn set_permissions(path: &std::path::Path, mode: u32) -> Result<(), KeyStoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|source| {
        KeyStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
pub(crate) fn set_permissions(_path: &std::path::Path, _mode: u32) -> Result<(), KeyStoreError> {
    Ok(())
}
