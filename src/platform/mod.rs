//! Platform-specific locations
//!
//! The AnyConnect CLI lives at a fixed path on Unix-like systems and is
//! looked up on `PATH` on Windows. The per-user config directory hangs off
//! `$HOME` or `%APPDATA%` respectively.

#[cfg(not(windows))]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
use unix as imp;
#[cfg(windows)]
use windows as imp;

use std::env;
use std::path::PathBuf;

pub use imp::{CLIENT_EXECUTABLE, CONFIG_DIR_NAME, HOME_VAR};

/// Name of the JSON file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Path of the AnyConnect command-line client for this host
pub fn client_executable() -> PathBuf {
    PathBuf::from(CLIENT_EXECUTABLE)
}

/// Compute the per-user config directory from an environment getter.
///
/// The home/app-data variable wins; when it is unset or empty the `dirs`
/// lookup is used instead. Returns `None` if neither yields a root.
pub fn config_dir_from<F>(get_var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let root = get_var(HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(imp::fallback_root)?;

    Some(root.join(CONFIG_DIR_NAME))
}

/// Per-user config directory taken from the process environment
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(|key| env::var(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_getter(
        vars: HashMap<String, String>,
    ) -> impl Fn(&str) -> Result<String, env::VarError> {
        move |key: &str| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn test_config_dir_uses_home_var() {
        let mut vars = HashMap::new();
        vars.insert(HOME_VAR.to_string(), "/tmp/someone".to_string());

        let dir = config_dir_from(make_getter(vars)).unwrap();

        assert_eq!(dir, PathBuf::from("/tmp/someone").join(CONFIG_DIR_NAME));
    }

    #[test]
    fn test_config_dir_empty_var_falls_back() {
        let mut vars = HashMap::new();
        vars.insert(HOME_VAR.to_string(), String::new());

        // Whatever the fallback yields, it must still end in our directory name
        if let Some(dir) = config_dir_from(make_getter(vars)) {
            assert!(dir.ends_with(CONFIG_DIR_NAME));
            assert_ne!(dir, PathBuf::from(CONFIG_DIR_NAME));
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unix_client_path() {
        assert_eq!(
            client_executable(),
            PathBuf::from("/opt/cisco/anyconnect/bin/vpn")
        );
        assert_eq!(CONFIG_DIR_NAME, ".easyconnect");
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_client_name() {
        assert_eq!(client_executable(), PathBuf::from("vpncli.exe"));
        assert_eq!(CONFIG_DIR_NAME, "easyconnect");
    }
}
