//! Transmission validator.
//!
//! Decides whether the inbound batch is structurally sufficient to
//! drive a control decision this cycle. A transmission failure is
//! fatal for the cycle and forces `Mode::EmergencyStop`.

use crate::classifier::ClassifiedBatch;

/// `true` if the classified batch is structurally valid for the given
/// pump count.
pub fn is_valid(classified: &ClassifiedBatch, pump_count: usize) -> bool {
    classified.level.is_some()
        && classified.steam.is_some()
        && classified.pump_state.len() == pump_count
        && classified.pump_control_state.len() == pump_count
}
