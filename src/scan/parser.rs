//! Raw scan output parsing.
//!
//! masscan reports discoveries as lines like
//! `Discovered open port 80/tcp on 10.0.0.1`: the fourth whitespace-delimited
//! field is the `<port>/<proto>` token and the last field is the address.
//! Anything that does not fit that shape is a recoverable per-line error.

use std::net::Ipv4Addr;

/// One parsed (address, port, protocol) discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFact {
    pub addr: Ipv4Addr,
    pub port: u16,
    pub proto: String,
}

/// Parse a single raw line. `None` means the line is malformed.
pub fn parse_line(line: &str) -> Option<ScanFact> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }

    let token = fields[3];
    let addr = *fields.last()?;

    let (port, proto) = token.split_once('/')?;
    let port: u16 = port.parse().ok()?;
    let addr: Ipv4Addr = addr.parse().ok()?;

    Some(ScanFact {
        addr,
        port,
        proto: proto.to_ascii_lowercase(),
    })
}

/// Parse a whole raw output body, dropping malformed lines.
pub fn parse_records(input: &str) -> Vec<ScanFact> {
    let mut facts = Vec::new();
    let mut skipped = 0usize;

    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(fact) => facts.push(fact),
            None => {
                skipped += 1;
                tracing::debug!(line, "skipping malformed scan line");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed scan output lines");
    }

    facts
}
