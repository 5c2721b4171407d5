//! Per-port partitioning of scan facts.
//!
//! For every *requested* port, collects the addresses discovered open on it,
//! deduplicates, sorts by numeric octet order, and writes one address per line
//! to `<stem>_<port>`. Ports with no matches produce no file; downstream
//! treats a missing file as "no results."

use crate::config::OutputBase;
use crate::scan::parser::ScanFact;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Build the per-port address lists for the requested ports.
///
/// Only TCP discoveries match; `Ipv4Addr` ordering gives the numeric sort
/// (`10.0.0.9` before `10.0.0.10`), and set semantics remove duplicates.
/// Ports with zero matches are omitted from the map.
pub fn partition(requested: &[u16], facts: &[ScanFact]) -> BTreeMap<u16, Vec<Ipv4Addr>> {
    let mut partitions = BTreeMap::new();

    for &port in requested {
        let addrs: BTreeSet<Ipv4Addr> = facts
            .iter()
            .filter(|fact| fact.port == port && fact.proto == "tcp")
            .map(|fact| fact.addr)
            .collect();

        if !addrs.is_empty() {
            partitions.insert(port, addrs.into_iter().collect());
        }
    }

    partitions
}

/// Persist each partition, overwriting any existing file of the same name.
pub fn write_partitions(
    partitions: &BTreeMap<u16, Vec<Ipv4Addr>>,
    base: &OutputBase,
) -> io::Result<Vec<(u16, PathBuf)>> {
    let mut written = Vec::with_capacity(partitions.len());

    for (&port, addrs) in partitions {
        let path = base.port_list_path(port);
        let mut body = String::new();
        for addr in addrs {
            body.push_str(&addr.to_string());
            body.push('\n');
        }
        fs::write(&path, body)?;
        written.push((port, path));
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetSpec;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn fact(addr: &str, port: u16, proto: &str) -> ScanFact {
        ScanFact {
            addr: addr.parse().unwrap(),
            port,
            proto: proto.to_string(),
        }
    }

    fn test_base(dir: &TempDir) -> OutputBase {
        let target: TargetSpec = "10.0.0.0/24".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        OutputBase::new(&format!("{}/scan", dir.path().display()), date, &target)
    }

    #[test]
    fn test_dedup_and_numeric_sort() {
        let facts = vec![
            fact("10.0.0.10", 80, "tcp"),
            fact("10.0.0.9", 80, "tcp"),
            fact("10.0.0.9", 80, "tcp"),
        ];
        let parts = partition(&[80], &facts);

        let addrs: Vec<String> = parts[&80].iter().map(|a| a.to_string()).collect();
        assert_eq!(addrs, vec!["10.0.0.9", "10.0.0.10"]);
    }

    #[test]
    fn test_only_requested_ports_partitioned() {
        let facts = vec![fact("10.0.0.1", 80, "tcp"), fact("10.0.0.1", 22, "tcp")];
        let parts = partition(&[80], &facts);
        assert_eq!(parts.len(), 1);
        assert!(parts.contains_key(&80));
    }

    #[test]
    fn test_udp_facts_do_not_match() {
        let facts = vec![fact("10.0.0.1", 161, "udp")];
        assert!(partition(&[161], &facts).is_empty());
    }

    #[test]
    fn test_empty_port_writes_no_file() {
        let dir = TempDir::new().unwrap();
        let base = test_base(&dir);

        let facts = vec![fact("10.0.0.1", 80, "tcp")];
        let parts = partition(&[80, 443], &facts);
        let written = write_partitions(&parts, &base).unwrap();

        assert_eq!(written.len(), 1);
        assert!(base.port_list_path(80).exists());
        assert!(!base.port_list_path(443).exists());
    }

    #[test]
    fn test_file_content_one_address_per_line() {
        let dir = TempDir::new().unwrap();
        let base = test_base(&dir);

        let facts = vec![
            fact("10.0.0.9", 80, "tcp"),
            fact("10.0.0.10", 80, "tcp"),
            fact("10.0.0.9", 80, "tcp"),
        ];
        write_partitions(&partition(&[80], &facts), &base).unwrap();

        let body = fs::read_to_string(base.port_list_path(80)).unwrap();
        assert_eq!(body, "10.0.0.9\n10.0.0.10\n");
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let base = test_base(&dir);

        let facts = vec![
            fact("192.168.1.50", 443, "tcp"),
            fact("192.168.1.2", 443, "tcp"),
        ];
        let parts = partition(&[443], &facts);

        write_partitions(&parts, &base).unwrap();
        let first = fs::read(base.port_list_path(443)).unwrap();

        write_partitions(&parts, &base).unwrap();
        let second = fs::read(base.port_list_path(443)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let base = test_base(&dir);
        fs::write(base.port_list_path(80), "10.9.9.9\n10.9.9.8\n").unwrap();

        let facts = vec![fact("10.0.0.1", 80, "tcp")];
        write_partitions(&partition(&[80], &facts), &base).unwrap();

        let body = fs::read_to_string(base.port_list_path(80)).unwrap();
        assert_eq!(body, "10.0.0.1\n");
    }
}
