//! Sensor/actuator fault detector.
//!
//! Run every cycle except in `Waiting` (only the initialization
//! handshake runs there) and except when already in `EmergencyStop`.
//! Checks run in priority order — the first pump/steam mismatch found
//! wins the cycle's failure classification — but the water-level check
//! is always evaluated regardless of what else matched.
//!
//! ## Fault lifecycle
//!
//! 1. A mismatch or out-of-band reading triggers a fault.
//! 2. [`detect`] records it in `ControllerState::failure`, demotes the
//!    mode, and emits the matching detection message.
//! 3. The mode stays demoted until the plant sends the matching repair
//!    message (handled by `controller`), not merely when a later cycle
//!    happens to find nothing wrong.
//!
//! Faults here are mutually exclusive classifications of one cycle's
//! primary problem, carried on a single tagged `Failure`, not
//! independent bits that can all be active simultaneously.

use core::fmt;

use crate::app::ports::OutboundMailbox;
use crate::classifier::{feedback_at, ClassifiedBatch};
use crate::config::BoilerCharacteristics;
use crate::controller::{ControllerState, Mode};
use crate::message::{Message, MessageKind};

/// The classification of the controller's current degradation. Valid
/// only while `mode` is `Degraded` or `Rescue`. Carries its own payload
/// (the failed pump index) rather than relying on a loose side field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Pump `pump`'s physical feedback disagrees with intended state.
    PumpState { pump: usize },
    /// Pump `pump`'s controller-relay feedback disagrees with intended state.
    PumpControlState { pump: usize },
    /// The steam sensor returned an inconsistent or out-of-range reading.
    SteamLevel,
    /// The water-level sensor returned an inconsistent or out-of-range reading.
    WaterLevel,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PumpState { pump } => write!(f, "pump {pump} state mismatch"),
            Self::PumpControlState { pump } => write!(f, "pump {pump} control-state mismatch"),
            Self::SteamLevel => write!(f, "steam sensor fault"),
            Self::WaterLevel => write!(f, "water level sensor fault"),
        }
    }
}

/// Run the ordered fault checks for one cycle.
///
/// Expects `state.water_level`/`state.steam_level` to already carry this
/// cycle's readings (assignment happens earlier in the per-mode cycle
/// handler). Returns `true` if the cycle is healthy — no pump, pump-control
/// or steam mismatch was found and no water-level safety demotion fired —
/// which the mode controller uses to decide whether to run the hydraulic
/// predictor and pump selector this cycle.
pub fn detect(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) -> bool {
    let mut healthy = true;
    let mut primary_classified = false;

    // 1. Pump-state mismatch — smallest index wins.
    for i in 0..state.pump_count() {
        if let Some(observed) = feedback_at(&classified.pump_state, i) {
            if state.pump_open(i) != observed {
                state.failure = Some(Failure::PumpState { pump: i });
                state.mode = Mode::Degraded;
                state.set_pump_open(i, observed);
                outbound.send(Message::new(MessageKind::PumpFailureDetection(i)));
                outbound.send(Message::new(MessageKind::ClosePump(i)));
                healthy = false;
                primary_classified = true;
                break;
            }
        }
    }

    // 2. Pump-control-state mismatch — only if no pump-state fault fired.
    if !primary_classified {
        for i in 0..state.pump_count() {
            if let Some(observed) = feedback_at(&classified.pump_control_state, i) {
                if state.pump_open(i) != observed {
                    state.failure = Some(Failure::PumpControlState { pump: i });
                    state.mode = Mode::Degraded;
                    state.set_pump_open(i, observed);
                    outbound.send(Message::new(MessageKind::PumpControlFailureDetection(i)));
                    healthy = false;
                    primary_classified = true;
                    break;
                }
            }
        }
    }

    // 3. Steam sensor fault — only if no pump fault fired.
    if !primary_classified
        && (state.steam_level < state.prev_steam_level
            || state.steam_level > characteristics.maximal_steam_rate())
    {
        state.failure = Some(Failure::SteamLevel);
        state.mode = Mode::Degraded;
        outbound.send(Message::new(MessageKind::SteamFailureDetection));
        healthy = false;
    }

    // 4. Water-level sanity — always evaluated.
    if state.initialized
        && ((state.water_level > 0.0 && state.water_level < characteristics.minimal_limit_level())
            || state.water_level > characteristics.maximal_limit_level())
    {
        state.mode = Mode::EmergencyStop;
        healthy = false;
    }
    if state.water_level < 0.0 || state.water_level >= characteristics.capacity() {
        state.failure = Some(Failure::WaterLevel);
        state.mode = Mode::Rescue;
        outbound.send(Message::new(MessageKind::LevelFailureDetection));
        healthy = false;
    }

    // Negative-sensor guard, independent of the checks above.
    if state.water_level < 0.0 && state.steam_level < 0.0 {
        state.mode = Mode::EmergencyStop;
        healthy = false;
    }

    healthy
}
