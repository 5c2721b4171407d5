//! Run configuration and artifact naming.
//!
//! `RunConfig` is the immutable per-run configuration, built once from parsed
//! arguments and passed by reference into each pipeline stage. `OutputBase` is
//! the shared filename stem every artifact of a run derives from.

use crate::probe::registry::{self, ProbeSpec};
use crate::types::{PortSelection, TargetSpec};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Normalized scan target.
    pub target: TargetSpec,
    /// Requested ports.
    pub ports: PortSelection,
    /// User-supplied output prefix (no timestamp, no target label).
    pub output_prefix: String,
    /// Probe names enabled by individual flags.
    pub probes: Vec<String>,
    /// Run every registered probe, regardless of individual flags.
    pub all_probes: bool,
    /// Optional per-invocation timeout for probe commands.
    pub probe_timeout: Option<Duration>,
    /// Show per-command detail.
    pub verbose: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl RunConfig {
    /// Resolve the enabled probes against the registry.
    ///
    /// Registry order is preserved and each probe appears at most once, so the
    /// all-probes flag dispatches every entry exactly once even when
    /// individual flags are also set.
    pub fn enabled_probes(&self) -> Vec<&'static ProbeSpec> {
        registry::all()
            .iter()
            .filter(|spec| self.all_probes || self.probes.iter().any(|name| name == spec.name))
            .collect()
    }
}

/// The common filename stem for all artifacts of one run.
///
/// Format: `<prefix>_<YYYY-MM-DD>_<addr>-<prefixlen>`. Computed once at run
/// start; the raw scan file, per-port address lists, and probe result files
/// all derive from it by suffixing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBase {
    stem: String,
}

impl OutputBase {
    /// Build the stem from an explicit date. Tests inject fixed dates here.
    pub fn new(prefix: &str, date: NaiveDate, target: &TargetSpec) -> Self {
        Self {
            stem: format!("{}_{}_{}", prefix, date, target.file_label()),
        }
    }

    /// Build the stem stamped with today's local date.
    pub fn for_today(prefix: &str, target: &TargetSpec) -> Self {
        Self::new(prefix, chrono::Local::now().date_naive(), target)
    }

    /// The bare stem string.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path of the raw scan output file.
    pub fn raw_path(&self) -> PathBuf {
        PathBuf::from(&self.stem)
    }

    /// Path of the address list for one port: `<stem>_<port>`.
    pub fn port_list_path(&self, port: u16) -> PathBuf {
        PathBuf::from(format!("{}_{}", self.stem, port))
    }

    /// Path of a probe's result file for one port: `<stem>_<port>_<suffix>`.
    pub fn probe_result_path(&self, port: u16, suffix: &str) -> PathBuf {
        PathBuf::from(format!("{}_{}_{}", self.stem, port, suffix))
    }
}
