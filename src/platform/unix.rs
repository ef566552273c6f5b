//! Unix-like hosts (Linux, macOS)

use std::path::PathBuf;

/// AnyConnect installs its CLI at a fixed location on Linux and macOS.
pub const CLIENT_EXECUTABLE: &str = "/opt/cisco/anyconnect/bin/vpn";

pub const HOME_VAR: &str = "HOME";

/// Hidden directory under `$HOME`.
pub const CONFIG_DIR_NAME: &str = ".easyconnect";

pub fn fallback_root() -> Option<PathBuf> {
    dirs::home_dir()
}
