//! Parsing of `vpn status` output
//!
//! The client prints a banner followed by lines such as
//!
//! ```text
//!   >> state: Connected
//!   >> notice: Connected to vpn.example.edu.
//! ```
//!
//! Only the `>> state:` line matters. The marker is matched case-sensitively,
//! the value case-insensitively.

use std::fmt;

/// Prefix of the status line, after surrounding whitespace is trimmed
pub const STATE_MARKER: &str = ">> state:";

/// Whether a tunnel is up, as far as the toggle is concerned.
///
/// Transitional client states (`Connecting`, `Reconnecting`, ...) count as
/// disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpnState {
    Connected,
    Disconnected,
}

impl VpnState {
    pub fn is_connected(self) -> bool {
        self == VpnState::Connected
    }
}

impl fmt::Display for VpnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VpnState::Connected => write!(f, "Connected"),
            VpnState::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// Scan client output for a `>> state: Connected` line.
///
/// Output without any state line yields [`VpnState::Disconnected`].
pub fn parse_status(output: &str) -> VpnState {
    let connected = output
        .split('\n')
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(STATE_MARKER))
        .any(|state| state.trim().eq_ignore_ascii_case("connected"));

    if connected {
        VpnState::Connected
    } else {
        VpnState::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "Cisco AnyConnect Secure Mobility Client (version 4.10.05095) .\n\
                          \n\
                          Copyright (c) 2004 - 2022 Cisco Systems, Inc.  All Rights Reserved.\n\
                          \n\
                          \n";

    #[test]
    fn test_connected() {
        let output = format!(
            "{}  >> state: Connected\n  >> notice: Connected to vpn.example.edu.\nVPN> ",
            BANNER
        );
        assert_eq!(parse_status(&output), VpnState::Connected);
    }

    #[test]
    fn test_disconnected() {
        let output = format!(
            "{}  >> state: Disconnected\n  >> registered with local VPN subsystem.\n",
            BANNER
        );
        assert_eq!(parse_status(&output), VpnState::Disconnected);
    }

    #[test]
    fn test_value_is_case_insensitive_and_trimmed() {
        assert_eq!(parse_status(">> state: connected"), VpnState::Connected);
        assert_eq!(parse_status(">> state:   CONNECTED  "), VpnState::Connected);
        assert_eq!(parse_status(">> state:Connected\r\n"), VpnState::Connected);
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert_eq!(parse_status(">> State: connected"), VpnState::Disconnected);
        assert_eq!(parse_status(">> STATE: Connected"), VpnState::Disconnected);
    }

    #[test]
    fn test_other_states_are_disconnected() {
        assert_eq!(parse_status(">> state: Connecting"), VpnState::Disconnected);
        assert_eq!(parse_status(">> state: Reconnecting"), VpnState::Disconnected);
        assert_eq!(parse_status(">> state: Connected to something"), VpnState::Disconnected);
    }

    #[test]
    fn test_no_state_line() {
        assert_eq!(parse_status(""), VpnState::Disconnected);
        assert_eq!(parse_status(BANNER), VpnState::Disconnected);
        assert_eq!(parse_status("state: Connected"), VpnState::Disconnected);
    }

    #[test]
    fn test_any_matching_line_wins() {
        let output = ">> state: Disconnected\n>> state: Connecting\n>> state: Connected\n";
        assert_eq!(parse_status(output), VpnState::Connected);
    }

    #[test]
    fn test_display() {
        assert_eq!(VpnState::Connected.to_string(), "Connected");
        assert_eq!(VpnState::Disconnected.to_string(), "Disconnected");
        assert!(VpnState::Connected.is_connected());
        assert!(!VpnState::Disconnected.is_connected());
    }
}
