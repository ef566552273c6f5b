//! AnyConnect CLI adapter
//!
//! Every interaction with the VPN goes through the vendor's command-line
//! client:
//!
//! | Operation | Arguments | stdin |
//! |-----------|-----------|-------|
//! | status | `status` | none |
//! | connect | `-s connect <server>` | `<group>\n<username>\n<password>\ny\n` |
//! | disconnect | `disconnect` | none |
//!
//! Process execution sits behind [`CommandRunner`] so the status parsing and
//! toggle logic can be exercised with canned output.

pub mod runner;
pub mod status;

pub use runner::ProcessRunner;
pub use status::{VpnState, parse_status};

use crate::config::Config;
use crate::platform;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while running {}: {source}", .program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} {}", .program.display(), exit_label(.code))]
    Exit {
        program: PathBuf,
        code: Option<i32>,
        output: String,
    },
}

impl ClientError {
    /// Whatever the client printed before failing, if it got that far
    pub fn output(&self) -> Option<&str> {
        match self {
            ClientError::Exit { output, .. } => Some(output),
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Captured result of one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// stdout and stderr, interleaved
    pub output: String,
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program` with `args`, feeding it `stdin`, and wait for it to finish.
///
/// A non-zero exit is not an error at this level; only failing to start or
/// talk to the process is.
pub trait CommandRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        stdin: &str,
    ) -> Result<CommandOutput, ClientError>;
}

/// Lines the client expects on stdin after `-s connect`: group, username,
/// password, then `y` to accept the login banner.
pub fn connect_payload(config: &Config) -> String {
    format!(
        "{}\n{}\n{}\ny\n",
        config.group, config.username, config.password
    )
}

/// Handle on the AnyConnect command-line client
#[derive(Debug, Clone)]
pub struct VpnClient<R = ProcessRunner> {
    program: PathBuf,
    runner: R,
}

impl VpnClient<ProcessRunner> {
    /// Client at the platform's default location
    pub fn new() -> Self {
        Self::with_runner(platform::client_executable(), ProcessRunner)
    }
}

impl Default for VpnClient<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> VpnClient<R> {
    pub fn with_runner(program: PathBuf, runner: R) -> Self {
        Self { program, runner }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Query the client and parse its state line
    pub fn status(&self) -> Result<VpnState, ClientError> {
        let output = self.invoke(&["status"], "")?;
        let state = parse_status(&output);
        info!("VPN state: {}", state);
        Ok(state)
    }

    /// Connect to the configured server; returns the client's output
    pub fn connect(&self, config: &Config) -> Result<String, ClientError> {
        self.invoke(&["-s", "connect", &config.server], &connect_payload(config))
    }

    /// Tear down the active session; returns the client's output
    pub fn disconnect(&self) -> Result<String, ClientError> {
        self.invoke(&["disconnect"], "")
    }

    fn invoke(&self, args: &[&str], stdin: &str) -> Result<String, ClientError> {
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let result = self.runner.run(&self.program, args, stdin)?;
        if !result.success() {
            return Err(ClientError::Exit {
                program: self.program.clone(),
                code: result.code,
                output: result.output,
            });
        }
        Ok(result.output)
    }
}
