//! Pipeline orchestration - scan, partition, dispatch.
//!
//! Stages run strictly in order and never backward: the scan completes before
//! partitioning starts, partitioning completes before any probe runs, and
//! probes run one after another. Probe failures are absorbed inside their own
//! dispatch stage and never change the overall trajectory.

pub mod invoker;
pub mod parser;
pub mod partition;

pub use parser::ScanFact;

use crate::config::{OutputBase, RunConfig};
use crate::error::PipelineResult;
use crate::output;
use crate::probe::{self, CommandRunner, PortDispatch, ProcessRunner};
use std::fs;
use std::io;
use std::path::PathBuf;

/// What one pipeline run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub base: OutputBase,
    /// Parsed (address, port) discoveries.
    pub discovered: usize,
    /// Per-port address files written.
    pub partitions: Vec<(u16, PathBuf)>,
    /// One report per (probe, port) pair dispatched.
    pub dispatches: Vec<PortDispatch>,
}

/// Run the full pipeline with today's date stamp and real child processes.
pub async fn run(config: &RunConfig) -> PipelineResult<RunSummary> {
    let base = OutputBase::for_today(&config.output_prefix, &config.target);
    run_with(config, &base, &ProcessRunner).await
}

/// Run the full pipeline against an explicit output base and command runner.
pub async fn run_with(
    config: &RunConfig,
    base: &OutputBase,
    runner: &dyn CommandRunner,
) -> PipelineResult<RunSummary> {
    if !config.quiet {
        output::print_run_header(
            &config.target.to_string(),
            &config.ports.scan_expression(),
            base.stem(),
        );
        output::print_stage(&format!("Running masscan against {}", config.target));
    }
    invoker::run_scan(config, base, runner).await?;

    if !config.quiet {
        output::print_stage("Partitioning results by port");
    }
    let facts = match fs::read_to_string(base.raw_path()) {
        Ok(raw) => parser::parse_records(&raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            output::print_warning("no raw scan output found; nothing to partition");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let requested = config.ports.ports();
    let partitions = partition::write_partitions(&partition::partition(&requested, &facts), base)?;
    if !config.quiet {
        output::print_info(&format!(
            "{} discovered pairs across {} open-port groups",
            facts.len(),
            partitions.len()
        ));
    }

    let mut dispatches = Vec::new();
    for spec in config.enabled_probes() {
        if !config.quiet {
            output::print_stage(&format!("Running {} probe", spec.name));
        }
        dispatches.extend(probe::dispatch(spec, base, config, runner).await);
    }

    if !config.quiet {
        output::print_success(&format!(
            "Masscan results can be found in {} (with appended port results)",
            base.stem()
        ));
    }

    Ok(RunSummary {
        base: base.clone(),
        discovered: facts.len(),
        partitions,
        dispatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::runner::testing::FakeRunner;
    use crate::types::PortSelection;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_config(ports: &str, probes: &[&str], all: bool) -> RunConfig {
        RunConfig {
            target: "10.0.0.0/24".parse().unwrap(),
            ports: ports.parse().unwrap(),
            output_prefix: "scan".to_string(),
            probes: probes.iter().map(|p| p.to_string()).collect(),
            all_probes: all,
            probe_timeout: None,
            verbose: false,
            quiet: true,
        }
    }

    fn test_base(dir: &TempDir, config: &RunConfig) -> OutputBase {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        OutputBase::new(
            &format!("{}/scan", dir.path().display()),
            date,
            &config.target,
        )
    }

    const RAW: &str = "Discovered open port 80/tcp on 10.0.0.10\n\
                       Discovered open port 80/tcp on 10.0.0.9\n\
                       Discovered open port 2049/tcp on 10.0.0.5\n\
                       garbage line\n";

    #[tokio::test]
    async fn test_end_to_end_partition_and_dispatch() {
        let dir = TempDir::new().unwrap();
        let config = test_config("80,443,2049", &["showmount"], false);
        let base = test_base(&dir, &config);
        let runner = FakeRunner::new().with_stdout("masscan", RAW);

        let summary = run_with(&config, &base, &runner).await.unwrap();

        // Raw output landed in the stem file
        assert_eq!(fs::read_to_string(base.raw_path()).unwrap(), RAW);

        // Two of the three requested ports had discoveries
        assert_eq!(summary.discovered, 3);
        let ports: Vec<u16> = summary.partitions.iter().map(|(p, _)| *p).collect();
        assert_eq!(ports, vec![80, 2049]);
        assert_eq!(
            fs::read_to_string(base.port_list_path(80)).unwrap(),
            "10.0.0.9\n10.0.0.10\n"
        );

        // showmount ran against the one host open on 2049
        assert_eq!(summary.dispatches.len(), 1);
        assert_eq!(summary.dispatches[0].attempted(), 1);
        assert_eq!(
            fs::read_to_string(base.probe_result_path(2049, "showmount")).unwrap(),
            "showmount -e 10.0.0.5\n"
        );
    }

    #[tokio::test]
    async fn test_all_probes_dispatch_in_registry_order() {
        let dir = TempDir::new().unwrap();
        let config = test_config("80", &["mysql"], true);
        let base = test_base(&dir, &config);
        let runner = FakeRunner::new().with_stdout("masscan", RAW);

        let summary = run_with(&config, &base, &runner).await.unwrap();

        // Every registry entry dispatched exactly once, in registry order
        let mut seen = Vec::new();
        for report in &summary.dispatches {
            if !seen.contains(&report.probe) {
                seen.push(report.probe.clone());
            }
        }
        let registry: Vec<String> = crate::probe::registry::all()
            .iter()
            .map(|s| s.name.to_string())
            .collect();
        assert_eq!(seen, registry);
    }

    #[tokio::test]
    async fn test_failed_scan_still_completes_run() {
        let dir = TempDir::new().unwrap();
        let config = test_config("80", &["nikto"], false);
        let base = test_base(&dir, &config);

        let mut runner = FakeRunner::new();
        // masscan itself fails to launch
        runner.fail_on.push("--wait=0".to_string());

        let summary = run_with(&config, &base, &runner).await.unwrap();

        assert_eq!(summary.discovered, 0);
        assert!(summary.partitions.is_empty());
        // nikto's ports were all skipped for missing input, not errored
        assert!(summary.dispatches.iter().all(|d| d.skipped));
    }
}
