//! Discovery scan invocation.
//!
//! Builds and executes the masscan command as a structured argument vector
//! and writes its captured stdout to the raw results file. The scan is
//! best-effort: launch failures and non-zero exits are surfaced as warnings,
//! and the pipeline carries on with whatever output exists.

use crate::config::{OutputBase, RunConfig};
use crate::error::PipelineResult;
use crate::output;
use crate::probe::CommandRunner;
use crate::types::{PortSelection, TargetSpec};
use std::fs;

/// The discovery scanner binary.
pub const MASSCAN: &str = "masscan";

/// Arguments for the discovery scan: `-p <expr> <target> --wait=0`.
pub fn masscan_argv(ports: &PortSelection, target: &TargetSpec) -> Vec<String> {
    vec![
        "-p".to_string(),
        ports.scan_expression(),
        target.to_string(),
        "--wait=0".to_string(),
    ]
}

/// Execute the discovery scan, writing raw output to `base`.
pub async fn run_scan(
    config: &RunConfig,
    base: &OutputBase,
    runner: &dyn CommandRunner,
) -> PipelineResult<()> {
    if !is_root() {
        output::print_warning(
            "masscan requires root privileges for raw socket access; results may be empty",
        );
    }

    let args = masscan_argv(&config.ports, &config.target);
    tracing::debug!(?args, "invoking masscan");

    match runner.run(MASSCAN, &args, None).await {
        Ok(out) => {
            fs::write(base.raw_path(), &out.stdout)?;
            if !out.success() {
                output::print_warning(&format!(
                    "masscan exited with status {}",
                    out.status
                        .map_or_else(|| "unknown".to_string(), |s| s.to_string())
                ));
            }
        }
        Err(e) => {
            output::print_warning(&format!("masscan failed to run: {}", e));
        }
    }

    Ok(())
}

/// Check if running with root/admin privileges.
fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masscan_argv_explicit_ports() {
        let ports: PortSelection = "80,443,8080".parse().unwrap();
        let target: TargetSpec = "192.168.1.0/24".parse().unwrap();
        assert_eq!(
            masscan_argv(&ports, &target),
            vec!["-p", "80,443,8080", "192.168.1.0/24", "--wait=0"]
        );
    }

    #[test]
    fn test_masscan_argv_presets_render_as_ranges() {
        let target: TargetSpec = "10.0.0.1".parse().unwrap();
        assert_eq!(
            masscan_argv(&PortSelection::All, &target),
            vec!["-p", "0-65535", "10.0.0.1/32", "--wait=0"]
        );
        assert_eq!(
            masscan_argv(&PortSelection::WellKnown, &target),
            vec!["-p", "0-1023", "10.0.0.1/32", "--wait=0"]
        );
    }
}
