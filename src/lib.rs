//! Steam-boiler supervisor control core.
//!
//! A periodic controller that, once every fixed cycle, ingests a batch
//! of sensor and actuator-feedback messages from a physical plant and
//! emits a batch of command messages back to it. See [`controller`] for
//! the top-level entry point and [`app::ports`] for the hexagonal
//! boundary between this crate and whatever mailbox transport a harness
//! wires up.

#![deny(unused_must_use)]

pub mod app;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod error;
pub mod fault;
pub mod message;
pub mod predictor;
pub mod selector;
pub mod validator;

pub use config::BoilerCharacteristics;
pub use controller::ModeController;
pub use error::{Error, Result};
