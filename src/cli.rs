//! Command-line interface definitions for dragnet.
//!
//! Uses `clap` derive macros for declarative argument parsing. Parsed
//! arguments convert into an immutable [`RunConfig`] before any side effect
//! occurs; bad targets or port lists are fatal here and nowhere else.

use crate::config::RunConfig;
use crate::error::PipelineResult;
use clap::Parser;
use std::time::Duration;

/// Orchestrates a masscan sweep and follow-up service probes.
///
/// The run writes a raw scan file, one deduplicated address list per open
/// port, and one result file per (port, probe), all sharing the stem
/// `<output>_<date>_<addr>-<prefix>`.
#[derive(Parser, Debug)]
#[command(name = "dragnet")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Masscan discovery piped into per-port follow-up probes", long_about = None)]
pub struct Args {
    /// Target network in CIDR notation; a bare address scans a single host
    #[arg(short = 't', long, value_name = "TARGET")]
    pub target: String,

    /// Ports to scan: comma-separated list, or "all" (0-65535) / "wk" (0-1023)
    #[arg(short = 'p', long = "ports", value_name = "PORTS")]
    pub ports: String,

    /// Output file stem; the run appends _<date>_<addr>-<prefix>
    #[arg(short = 'o', long, value_name = "PREFIX")]
    pub output: String,

    /// Run the nikto probe (web servers)
    #[arg(short = 'n', long)]
    pub nikto: bool,

    /// Run the enum4linux probe (SMB/NetBIOS enumeration)
    #[arg(short = 'e', long)]
    pub enum4linux: bool,

    /// Run the showmount probe (NFS exports)
    #[arg(short = 's', long)]
    pub showmount: bool,

    /// Run the ftp-anon probe (anonymous FTP check)
    #[arg(long = "ftp-anon")]
    pub ftp_anon: bool,

    /// Run the vnc probe
    #[arg(long)]
    pub vnc: bool,

    /// Run the smtp-relay probe (open relay check)
    #[arg(long = "smtp-relay")]
    pub smtp_relay: bool,

    /// Run the mysql probe
    #[arg(long)]
    pub mysql: bool,

    /// Run the mssql probe
    #[arg(long)]
    pub mssql: bool,

    /// Run every registered probe
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Per-probe-invocation timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS", default_value = "0")]
    pub probe_timeout: u64,

    /// Show per-command detail
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate and convert into the immutable run configuration.
    pub fn into_config(self) -> PipelineResult<RunConfig> {
        let target = self.target.parse()?;
        let ports = self.ports.parse()?;

        let flags = [
            (self.nikto, "nikto"),
            (self.enum4linux, "enum4linux"),
            (self.showmount, "showmount"),
            (self.ftp_anon, "ftp-anon"),
            (self.vnc, "vnc"),
            (self.smtp_relay, "smtp-relay"),
            (self.mysql, "mysql"),
            (self.mssql, "mssql"),
        ];
        let probes = flags
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, name)| name.to_string())
            .collect();

        Ok(RunConfig {
            target,
            ports,
            output_prefix: self.output,
            probes,
            all_probes: self.all,
            probe_timeout: (self.probe_timeout > 0)
                .then(|| Duration::from_secs(self.probe_timeout)),
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
