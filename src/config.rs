//! Configuration handling for easyconnect
//!
//! A single JSON file in the per-user config directory holds the server,
//! group, credentials and the AnyConnect log flag. When the file is missing
//! or one of the required fields is empty, the user is prompted for a fresh
//! set of values and the file is overwritten.

use crate::console::Console;
use crate::platform;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user config directory")]
    NoConfigDir,
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to read input: {0}")]
    Prompt(#[source] io::Error),
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Connection settings persisted between runs.
///
/// Missing keys and `null` values deserialize to empty strings, which makes
/// the config incomplete and triggers regeneration on load.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "null_as_empty")]
    pub server: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub group: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    /// Echo the raw AnyConnect output after connect/disconnect
    pub cisco_logs: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Names of the required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("server", &self.server),
            ("group", &self.group),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("group", &self.group)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("cisco_logs", &self.cisco_logs)
            .finish()
    }
}

/// Location of the config file plus load/generate/save against it
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store in the platform's per-user directory, creating it if needed
    pub fn resolve() -> Result<Self, ConfigError> {
        let dir = platform::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Self::in_dir(&dir)
    }

    /// Store named `config.json` inside `dir`, creating `dir` owner-only
    pub fn in_dir(dir: &Path) -> Result<Self, ConfigError> {
        ensure_private_dir(dir)?;
        Ok(Self {
            path: dir.join(platform::CONFIG_FILE_NAME),
        })
    }

    /// Store at an explicit file path; its parent directory is created if missing
    pub fn at(path: PathBuf) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_private_dir(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config, prompting for a new one when absent or incomplete.
    ///
    /// Malformed JSON is an error; the file is left untouched in that case.
    pub fn load(&self, console: &mut dyn Console) -> Result<Config, ConfigError> {
        debug!("Loading config from {}", self.path.display());

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}", self.path.display());
                console
                    .say("Configuration file not found. Let's create one.")
                    .map_err(ConfigError::Prompt)?;
                return self.generate(console);
            }
            Err(e) => return Err(ConfigError::io(&self.path, e)),
        };

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if !config.is_complete() {
            warn!(
                "Config is missing {:?}, regenerating",
                config.missing_fields()
            );
            console
                .say("Configuration file is incomplete. Let's create a new one.")
                .map_err(ConfigError::Prompt)?;
            return self.generate(console);
        }

        Ok(config)
    }

    /// Prompt for every setting and overwrite the file with the answers
    pub fn generate(&self, console: &mut dyn Console) -> Result<Config, ConfigError> {
        let server = ask_required(console, "Enter VPN server address: ", false)?;
        let group = ask_required(console, "Enter VPN group name(number): ", false)?;
        let username = ask_required(console, "Enter VPN username: ", false)?;
        let password = ask_required(console, "Enter VPN password: ", true)?;

        let answer = console
            .ask("Do you want to enable Cisco logs? (y/n): ")
            .map_err(ConfigError::Prompt)?;
        let cisco_logs = answer.trim().eq_ignore_ascii_case("y");

        let config = Config {
            server,
            group,
            username,
            password,
            cisco_logs,
        };

        self.save(&config)?;
        console
            .say(&format!("Configuration saved to {}", self.path.display()))
            .map_err(ConfigError::Prompt)?;

        Ok(config)
    }

    /// Write the config as two-space indented JSON, truncating any old file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut content =
            serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        content.push('\n');

        let mut file =
            open_private_file(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::io(&self.path, e))?;

        info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

/// Ask until a non-empty answer arrives. Plain fields are trimmed, secrets
/// are kept verbatim.
fn ask_required(
    console: &mut dyn Console,
    prompt: &str,
    secret: bool,
) -> Result<String, ConfigError> {
    loop {
        let answer = if secret {
            console.ask_secret(prompt)
        } else {
            console.ask(prompt).map(|a| a.trim().to_string())
        };
        let answer = answer.map_err(ConfigError::Prompt)?;

        if !answer.is_empty() {
            return Ok(answer);
        }
        console
            .say("A value is required.")
            .map_err(ConfigError::Prompt)?;
    }
}

fn ensure_private_dir(dir: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    let result = {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
    };
    #[cfg(not(unix))]
    let result = fs::create_dir_all(dir);

    result.map_err(|e| ConfigError::io(dir, e))
}

fn open_private_file(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;

    // The mode above only applies on creation; an existing file keeps its bits
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}
