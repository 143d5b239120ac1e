//! Unified error type for the steam-boiler supervisor core.
//!
//! A single `Error` enum every fallible construction path converts
//! into. Per-cycle protocol conditions — transmission failure, sensor
//! fault, actuator fault, safety violation — are **not** represented
//! here; they are reflected in mode changes and detection messages,
//! never thrown out-of-band (see `controller`).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level core error
// ---------------------------------------------------------------------------

/// Every fallible construction-time operation in this crate funnels
/// into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `BoilerCharacteristics` failed validation.
    /// The `&'static str` names the field and the violated constraint.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
