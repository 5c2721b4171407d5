//! Port selection with named presets.
//!
//! A selection is either an explicit ordered list of distinct ports or one of
//! two presets: `all` (0-65535) and `wk` (well-known, 0-1023). Expansion to a
//! port list and rendering of the scan-range expression are both derived from
//! the same value, so neither can observe a half-expanded state.

use std::fmt;
use std::str::FromStr;

/// Error type for port-selection parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("empty port specification")]
    Empty,
}

/// Ports requested for the discovery scan.
///
/// Port 0 is permitted: masscan scans it, and the presets start there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
    /// Every port, 0-65535.
    All,
    /// Well-known ports, 0-1023.
    WellKnown,
    /// Explicit comma-separated list, order preserved, duplicates removed.
    List(Vec<u16>),
}

impl PortSelection {
    /// Expand to the full requested port list.
    ///
    /// This list drives partitioning and probe dispatch; presets expand to
    /// every port in their range.
    pub fn ports(&self) -> Vec<u16> {
        match self {
            Self::All => (0..=u16::MAX).collect(),
            Self::WellKnown => (0..=1023).collect(),
            Self::List(ports) => ports.clone(),
        }
    }

    /// The `-p` expression handed to the scanner.
    ///
    /// Presets render as a range; explicit lists render comma-separated.
    pub fn scan_expression(&self) -> String {
        match self {
            Self::All => "0-65535".to_string(),
            Self::WellKnown => "0-1023".to_string(),
            Self::List(ports) => ports
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Number of requested ports.
    pub fn count(&self) -> usize {
        match self {
            Self::All => 65536,
            Self::WellKnown => 1024,
            Self::List(ports) => ports.len(),
        }
    }
}

impl FromStr for PortSelection {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        match s {
            "all" => return Ok(Self::All),
            "wk" | "well-known" => return Ok(Self::WellKnown),
            _ => {}
        }

        let mut ports = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let port: u16 = part
                .parse()
                .map_err(|_| PortError::InvalidFormat(part.to_string()))?;
            if !ports.contains(&port) {
                ports.push(port);
            }
        }

        if ports.is_empty() {
            return Err(PortError::Empty);
        }

        Ok(Self::List(ports))
    }
}

impl fmt::Display for PortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scan_expression())
    }
}
