//! Probe dispatch - drives follow-up tools over per-port address lists.
//!
//! For each enabled probe and each of its configured ports, the dispatcher
//! reads the partitioned address file and runs the probe's command once per
//! address, appending combined stdout/stderr to the per-port result file.
//! Probes are best-effort: a missing address file skips that port, and a
//! failing invocation never stops the remaining addresses or the run.

pub mod registry;
pub mod runner;

pub use registry::{ProbeSpec, TemplateArg};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner, RunnerError};

use crate::config::{OutputBase, RunConfig};
use crate::output;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result of one probe invocation against one address.
///
/// Failures are explicit values rather than suppressed exceptions, so they
/// stay observable in reports and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Process ran to completion; the exit status may still be non-zero.
    Completed { status: Option<i32> },
    /// Killed after exceeding the per-invocation timeout.
    TimedOut,
    /// Process could not be started.
    LaunchFailed(String),
    /// Output could not be appended to the result file.
    WriteFailed(String),
}

impl InvocationOutcome {
    /// True for anything other than a completed run.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Completed { .. })
    }
}

/// Per-address outcome within one (probe, port) dispatch.
#[derive(Debug, Clone)]
pub struct AddressOutcome {
    pub address: String,
    pub outcome: InvocationOutcome,
}

/// Report for one (probe, port) pair.
#[derive(Debug, Clone)]
pub struct PortDispatch {
    pub probe: String,
    pub port: u16,
    /// The per-port address file was absent; nothing was attempted.
    pub skipped: bool,
    pub outcomes: Vec<AddressOutcome>,
    /// Result file, present once at least one invocation produced output.
    pub result_file: Option<PathBuf>,
}

impl PortDispatch {
    fn missing_input(probe: &ProbeSpec, port: u16) -> Self {
        Self {
            probe: probe.name.to_string(),
            port,
            skipped: true,
            outcomes: Vec::new(),
            result_file: None,
        }
    }

    /// Number of addresses attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of failed invocations.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_failure()).count()
    }
}

/// Run one probe across all of its configured ports.
pub async fn dispatch(
    spec: &ProbeSpec,
    base: &OutputBase,
    config: &RunConfig,
    runner: &dyn CommandRunner,
) -> Vec<PortDispatch> {
    let mut reports = Vec::with_capacity(spec.ports.len());
    for &port in spec.ports {
        reports.push(dispatch_port(spec, port, base, config, runner).await);
    }
    reports
}

async fn dispatch_port(
    spec: &ProbeSpec,
    port: u16,
    base: &OutputBase,
    config: &RunConfig,
    runner: &dyn CommandRunner,
) -> PortDispatch {
    let input = base.port_list_path(port);
    let addresses = match read_address_list(&input) {
        Ok(Some(addresses)) => addresses,
        Ok(None) => {
            if !config.quiet {
                output::print_info(&format!(
                    "{} not found, skipping {} on port {}",
                    input.display(),
                    spec.name,
                    port
                ));
            }
            tracing::debug!(probe = spec.name, port, "no address list, skipping");
            return PortDispatch::missing_input(spec, port);
        }
        Err(e) => {
            output::print_warning(&format!("cannot read {}: {}", input.display(), e));
            return PortDispatch::missing_input(spec, port);
        }
    };

    let result_path = base.probe_result_path(port, spec.suffix);
    // Created on first write, truncating any artifact left by an earlier run
    let mut sink: Option<File> = None;
    let mut outcomes = Vec::with_capacity(addresses.len());

    let progress = if config.quiet {
        None
    } else {
        let pb = ProgressBar::new(addresses.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    };

    for address in &addresses {
        if let Some(ref pb) = progress {
            pb.set_message(format!("{} {}:{}", spec.name, address, port));
        }
        let args = spec.argv(address, port);
        tracing::debug!(program = spec.program, ?args, "running probe");
        if config.verbose {
            let line = format!("+ {} {}", spec.program, args.join(" "));
            match &progress {
                Some(pb) => pb.println(line),
                None => println!("{}", line),
            }
        }

        let outcome = match runner.run(spec.program, &args, config.probe_timeout).await {
            Ok(out) => match append_output(&mut sink, &result_path, &out) {
                Ok(()) => {
                    if !out.success() {
                        report(&progress, &format!(
                            "{} against {}:{} exited with status {}",
                            spec.name,
                            address,
                            port,
                            out.status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
                        ));
                    }
                    InvocationOutcome::Completed { status: out.status }
                }
                Err(e) => {
                    report(&progress, &format!(
                        "could not write {}: {}",
                        result_path.display(),
                        e
                    ));
                    InvocationOutcome::WriteFailed(e.to_string())
                }
            },
            Err(RunnerError::TimedOut(limit)) => {
                report(&progress, &format!(
                    "{} against {}:{} timed out after {:?}",
                    spec.name, address, port, limit
                ));
                InvocationOutcome::TimedOut
            }
            Err(RunnerError::Launch(e)) => {
                report(&progress, &format!(
                    "{} failed to launch against {}:{}: {}",
                    spec.name, address, port, e
                ));
                InvocationOutcome::LaunchFailed(e.to_string())
            }
        };

        outcomes.push(AddressOutcome {
            address: address.clone(),
            outcome,
        });
        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result_file = sink.is_some().then(|| result_path.clone());
    if let Some(ref path) = result_file {
        if !config.quiet {
            output::print_success(&format!(
                "{} results for port {} can be found in {}",
                spec.name,
                port,
                path.display()
            ));
        }
    }

    PortDispatch {
        probe: spec.name.to_string(),
        port,
        skipped: false,
        outcomes,
        result_file,
    }
}

/// Read one partition file; `Ok(None)` means the file does not exist.
fn read_address_list(path: &Path) -> io::Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(body) => Ok(Some(
            body.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Append one invocation's combined output, creating the file on first use.
fn append_output(
    sink: &mut Option<File>,
    path: &Path,
    out: &CommandOutput,
) -> io::Result<()> {
    if sink.is_none() {
        *sink = Some(File::create(path)?);
    }
    if let Some(file) = sink.as_mut() {
        file.write_all(&out.stdout)?;
        file.write_all(&out.stderr)?;
    }
    Ok(())
}

/// Route a warning through the progress bar when one is active, so the bar
/// does not garble the line.
fn report(progress: &Option<ProgressBar>, msg: &str) {
    match progress {
        Some(pb) => pb.println(format!("Warning: {}", msg)),
        None => tracing::warn!("{}", msg),
    }
}
