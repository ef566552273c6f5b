//! easyconnect - one-shot Cisco AnyConnect toggle
//!
//! Each run checks whether the AnyConnect tunnel is up and flips it:
//! disconnect when connected, connect when not. Credentials live in a small
//! JSON file that is created interactively on first use.
//!
//! # Architecture
//!
//! - `config`: JSON config file, interactive generation
//! - `console`: prompt/print abstraction over stdin and stdout
//! - `platform`: client executable and config directory per OS
//! - `anyconnect`: CLI adapter, process runner, status parsing
//! - `toggle`: the status → connect/disconnect decision
//!
//! # Usage
//!
//! ```bash
//! easyconnect            # toggle
//! easyconnect status     # report only
//! ```

pub mod anyconnect;
pub mod config;
pub mod console;
pub mod platform;
pub mod toggle;

pub use anyconnect::{VpnClient, VpnState};
pub use config::{Config, ConfigStore};
pub use toggle::{Action, Outcome, ToggleError, run_session};
