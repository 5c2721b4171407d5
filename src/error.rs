//! Error types for dragnet.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::types::{PortError, TargetError};
use thiserror::Error;

/// Main error type for pipeline runs.
///
/// Argument-shaped errors (bad target, bad port list) are fatal before any
/// side effect; everything downstream of argument validation is best-effort
/// and surfaces as warnings rather than errors. IO errors escape only when a
/// pipeline-owned artifact cannot be written at all.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid target: {0}")]
    Target(#[from] TargetError),

    #[error("invalid port specification: {0}")]
    Ports(#[from] PortError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
