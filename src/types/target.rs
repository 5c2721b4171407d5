//! Target specification with CIDR normalization.
//!
//! A target is always an IPv4 network: a bare address is treated as a /32
//! single host. The normalized form drives both the scan invocation and the
//! `addr-prefix` label embedded in every artifact filename.

use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Error type for target parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target format: {0}")]
    InvalidFormat(String),
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),
    #[error("IPv6 targets are not supported: {0}")]
    Ipv6Unsupported(String),
}

/// A normalized scan target: IPv4 network address plus prefix length.
///
/// Immutable once parsed. `10.0.0.1` normalizes to `10.0.0.1/32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    network: Ipv4Network,
}

impl TargetSpec {
    /// Parse a target specification from a string.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(TargetError::InvalidFormat(s.to_string()));
        }

        // Reject IPv6 up front so the error names the real problem
        if s.contains(':') {
            return Err(TargetError::Ipv6Unsupported(s.to_string()));
        }

        // Bare address becomes a single-host network
        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            let network = Ipv4Network::new(addr, 32)
                .map_err(|_| TargetError::InvalidFormat(s.to_string()))?;
            return Ok(Self { network });
        }

        if s.contains('/') {
            let network: Ipv4Network = s
                .parse()
                .map_err(|_| TargetError::InvalidCidr(s.to_string()))?;
            return Ok(Self { network });
        }

        Err(TargetError::InvalidFormat(s.to_string()))
    }

    /// The network address.
    pub fn address(&self) -> Ipv4Addr {
        self.network.ip()
    }

    /// The prefix length.
    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Label used in artifact filenames: `10.0.0.0-24`.
    pub fn file_label(&self) -> String {
        format!("{}-{}", self.address(), self.prefix())
    }
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address(), self.prefix())
    }
}
