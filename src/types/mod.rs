//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states
//! unrepresentable: a `TargetSpec` always carries an explicit prefix, and a
//! `PortSelection` cannot be expanded and joined inconsistently.

mod ports;
mod target;

pub use ports::{PortError, PortSelection};
pub use target::{TargetError, TargetSpec};
