//! # dragnet - Scan Orchestration for Follow-up Enumeration
//!
//! dragnet drives a masscan sweep over a target range, partitions the
//! discovered open (host, port) pairs into per-port address lists, and runs a
//! set of specialized follow-up probes (nikto, enum4linux, showmount, nmap
//! NSE checks) against each list, collecting every probe's output into
//! per-port result files.
//!
//! ## Pipeline
//!
//! ```text
//! target + ports
//!     -> masscan          (raw output file)
//!     -> parse            ((address, port) facts)
//!     -> partition        (one sorted, deduplicated address file per port)
//!     -> dispatch probes  (one result file per port per probe)
//! ```
//!
//! Probes are best-effort by design: a port with no discoveries is skipped,
//! and a single unreachable host or crashing tool never aborts the batch.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use dragnet::config::RunConfig;
//! use dragnet::scan;
//! use dragnet::types::PortSelection;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RunConfig {
//!         target: "192.168.1.0/24".parse().unwrap(),
//!         ports: "80,443,2049".parse::<PortSelection>().unwrap(),
//!         output_prefix: "engagement".to_string(),
//!         probes: vec!["nikto".to_string()],
//!         all_probes: false,
//!         probe_timeout: None,
//!         verbose: false,
//!         quiet: false,
//!     };
//!
//!     let summary = scan::run(&config).await.unwrap();
//!     println!("{} discoveries", summary.discovered);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target and port-selection types with validating parsers
//! - [`config`] - Immutable run configuration and artifact naming
//! - [`scan`] - The pipeline stages: invoke, parse, partition
//! - [`probe`] - Probe registry, command-execution seam, and dispatcher
//! - [`error`] - Pipeline error types
//! - [`output`] - Styled user-facing output helpers

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod probe;
pub mod scan;
pub mod types;

// Re-export commonly used types
pub use config::{OutputBase, RunConfig};
pub use error::{PipelineError, PipelineResult};
pub use probe::{CommandRunner, PortDispatch, ProbeSpec, ProcessRunner};
pub use scan::{RunSummary, ScanFact};
pub use types::{PortSelection, TargetSpec};
