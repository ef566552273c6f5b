//! Connect/disconnect orchestration
//!
//! One run goes through these steps in order:
//!
//! 1. Load (or interactively create) the config
//! 2. Ask the AnyConnect client for its state
//! 3. Decide what to do from the requested [`Action`] and that state
//! 4. Run connect or disconnect, echoing the client output if `cisco_logs` is set
//!
//! Any failure stops the run. The error's `Display` starts with the phrase
//! shown to the user, e.g. `Error checking VPN status: ...`.

use crate::anyconnect::{ClientError, CommandRunner, VpnClient, VpnState};
use crate::config::{Config, ConfigError, ConfigStore};
use crate::console::Console;
use std::io;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("Error loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("Error checking VPN status: {0}")]
    Status(#[source] ClientError),
    #[error("Error connecting VPN: {0}")]
    Connect(#[source] ClientError),
    #[error("Error disconnecting VPN: {0}")]
    Disconnect(#[source] ClientError),
    #[error("Error writing to console: {0}")]
    Console(#[from] io::Error),
}

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Connect when down, disconnect when up
    Toggle,
    Connect,
    Disconnect,
    /// Report only
    Status,
}

/// What the run will do to the tunnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    Disconnect,
    Nothing,
}

impl Action {
    pub fn plan(self, state: VpnState) -> Step {
        match (self, state) {
            (Action::Toggle, VpnState::Connected)
            | (Action::Disconnect, VpnState::Connected) => Step::Disconnect,
            (Action::Toggle, VpnState::Disconnected)
            | (Action::Connect, VpnState::Disconnected) => Step::Connect,
            (Action::Connect, VpnState::Connected)
            | (Action::Disconnect, VpnState::Disconnected)
            | (Action::Status, _) => Step::Nothing,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Connected,
    Disconnected,
    /// Nothing was changed; carries the observed state
    Unchanged(VpnState),
}

/// Load the config from `store`, then [`run`] the action
pub fn run_session<R: CommandRunner>(
    action: Action,
    store: &ConfigStore,
    client: &VpnClient<R>,
    console: &mut dyn Console,
) -> Result<Outcome, ToggleError> {
    let config = store.load(console)?;
    run(action, &config, client, console)
}

/// Query the tunnel state and carry out `action` against it
pub fn run<R: CommandRunner>(
    action: Action,
    config: &Config,
    client: &VpnClient<R>,
    console: &mut dyn Console,
) -> Result<Outcome, ToggleError> {
    let state = client.status().map_err(ToggleError::Status)?;
    let step = action.plan(state);
    info!("{:?} with VPN {}: {:?}", action, state, step);

    match step {
        Step::Disconnect => {
            console.say("VPN is currently connected. Disconnecting...")?;
            let result = client.disconnect();
            echo_client_output(config, &result, console)?;
            result.map_err(ToggleError::Disconnect)?;
            console.say("VPN disconnected successfully.")?;
            Ok(Outcome::Disconnected)
        }
        Step::Connect => {
            console.say("VPN is not connected. Connecting...")?;
            let result = client.connect(config);
            echo_client_output(config, &result, console)?;
            result.map_err(ToggleError::Connect)?;
            console.say("VPN connected successfully.")?;
            Ok(Outcome::Connected)
        }
        Step::Nothing => {
            let message = match (action, state) {
                (Action::Status, _) => format!("VPN status: {}", state),
                (_, VpnState::Connected) => "VPN is already connected.".to_string(),
                (_, VpnState::Disconnected) => "VPN is not connected.".to_string(),
            };
            console.say(&message)?;
            Ok(Outcome::Unchanged(state))
        }
    }
}

/// Print raw client output when `cisco_logs` is on, whether or not the call failed.
/// The output is written as-is, followed by a newline.
fn echo_client_output(
    config: &Config,
    result: &Result<String, ClientError>,
    console: &mut dyn Console,
) -> io::Result<()> {
    if !config.cisco_logs {
        return Ok(());
    }

    let output = match result {
        Ok(output) => Some(output.as_str()),
        Err(e) => e.output(),
    };
    match output {
        Some(output) => console.say(output),
        None => Ok(()),
    }
}
