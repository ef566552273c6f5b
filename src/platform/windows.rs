//! Windows hosts

use std::path::PathBuf;

/// Resolved through `PATH`; the AnyConnect installer registers its directory.
pub const CLIENT_EXECUTABLE: &str = "vpncli.exe";

pub const HOME_VAR: &str = "APPDATA";

pub const CONFIG_DIR_NAME: &str = "easyconnect";

/// Roaming app data, same place `%APPDATA%` points to.
pub fn fallback_root() -> Option<PathBuf> {
    dirs::config_dir()
}
