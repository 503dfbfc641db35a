//! Mux cable records, modes and per-port outcomes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Error returned when a mux mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mux mode: {0}")]
pub struct ParseMuxModeError(pub String);

/// Mux cable mode, as configured in CONFIG_DB or reported by STATE_DB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MuxMode {
    /// Link manager picks the active side.
    Auto,
    /// This ToR carries the traffic.
    Active,
    /// The peer ToR carries the traffic.
    Standby,
    /// Link manager does not touch the mux.
    Manual,
}

impl MuxMode {
    /// Returns the mode name as stored in the databases.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MuxMode::Auto => "auto",
            MuxMode::Active => "active",
            MuxMode::Standby => "standby",
            MuxMode::Manual => "manual",
        }
    }
}

impl fmt::Display for MuxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuxMode {
    type Err = ParseMuxModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(MuxMode::Auto),
            "active" => Ok(MuxMode::Active),
            "standby" => Ok(MuxMode::Standby),
            "manual" => Ok(MuxMode::Manual),
            _ => Err(ParseMuxModeError(s.to_string())),
        }
    }
}

/// Outcome of a mode change on one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModeOutcome {
    /// The change was accepted (or nothing had to change).
    #[serde(rename = "OK")]
    Ok,
    /// The hardware has not yet reached the requested state.
    #[serde(rename = "INPROGRESS")]
    InProgress,
}

impl ModeOutcome {
    /// Returns the outcome label printed in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModeOutcome::Ok => "OK",
            ModeOutcome::InProgress => "INPROGRESS",
        }
    }
}

impl fmt::Display for ModeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ports a mode change applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortScope {
    /// Every port with a mux cable entry.
    All,
    /// A single named port.
    Port(String),
}

impl From<&str> for PortScope {
    fn from(s: &str) -> Self {
        if s == "all" {
            PortScope::All
        } else {
            PortScope::Port(s.to_string())
        }
    }
}

impl fmt::Display for PortScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortScope::All => f.write_str("all"),
            PortScope::Port(port) => f.write_str(port),
        }
    }
}

/// Current mux status of one port (STATE_DB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortStatus {
    pub port: String,
    pub status: String,
    pub health: String,
}

/// Configured mux settings of one port (CONFIG_DB).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConfig {
    pub port: String,
    pub state: String,
    pub ipv4: String,
    pub ipv6: String,
}

/// This switch and its peer ToR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchInfo {
    pub switch_name: String,
    pub peer_tor: String,
}

/// Result of a status query, ports in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusView {
    pub ports: Vec<PortStatus>,
}

/// Result of a config query, ports in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigView {
    pub switch: SwitchInfo,
    pub ports: Vec<PortConfig>,
}

/// Per-port outcomes of a mode change, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeReport {
    pub outcomes: Vec<(String, ModeOutcome)>,
}

impl ModeReport {
    /// Returns the outcome recorded for `port`.
    pub fn outcome(&self, port: &str) -> Option<ModeOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == port)
            .map(|(_, outcome)| *outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mux_mode_roundtrip() {
        for mode in [MuxMode::Auto, MuxMode::Active, MuxMode::Standby, MuxMode::Manual] {
            assert_eq!(mode.to_string().parse::<MuxMode>().unwrap(), mode);
        }
        assert_eq!("ACTIVE".parse::<MuxMode>().unwrap(), MuxMode::Active);
        assert!("unknown".parse::<MuxMode>().is_err());
    }

    #[test]
    fn test_mode_outcome_labels() {
        assert_eq!(ModeOutcome::Ok.to_string(), "OK");
        assert_eq!(ModeOutcome::InProgress.to_string(), "INPROGRESS");
        assert_eq!(
            serde_json::to_string(&ModeOutcome::InProgress).unwrap(),
            "\"INPROGRESS\""
        );
    }

    #[test]
    fn test_port_scope_from_str() {
        assert_eq!(PortScope::from("all"), PortScope::All);
        assert_eq!(
            PortScope::from("Ethernet0"),
            PortScope::Port("Ethernet0".to_string())
        );
        assert_eq!(PortScope::Port("Ethernet4".to_string()).to_string(), "Ethernet4");
    }

    #[test]
    fn test_mode_report_lookup() {
        let report = ModeReport {
            outcomes: vec![
                ("Ethernet0".to_string(), ModeOutcome::Ok),
                ("Ethernet1".to_string(), ModeOutcome::InProgress),
            ],
        };
        assert_eq!(report.outcome("Ethernet1"), Some(ModeOutcome::InProgress));
        assert_eq!(report.outcome("Ethernet2"), None);
    }
}
