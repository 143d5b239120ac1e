//! Pump selector.
//!
//! Chooses the pump count that minimizes deviation from the ideal
//! mid-band level, then reconciles the controller's intended pump
//! state to that count by emitting open/close deltas against the
//! plant's control-relay feedback.

use crate::app::ports::OutboundMailbox;
use crate::classifier::{feedback_at, ClassifiedBatch};
use crate::config::BoilerCharacteristics;
use crate::controller::ControllerState;
use crate::message::{Message, MessageKind};
use crate::predictor::Candidate;

/// Pick `k* = argmin_k |mid(k) - normal_mid|`, ties broken toward the
/// smaller `k` by iteration order.
pub fn select_k(candidates: &[Candidate], normal_mid: f64) -> usize {
    candidates
        .iter()
        .min_by(|a, b| {
            let da = (a.mid - normal_mid).abs();
            let db = (b.mid - normal_mid).abs();
            da.partial_cmp(&db).expect("predicted levels are never NaN")
        })
        .map(|c| c.k)
        .expect("candidate table always has at least the k=0 entry")
}

/// Reconcile `pump_open`/`active_pumps` to `k_star`, emitting one
/// `OPEN_PUMP`/`CLOSE_PUMP` per pump walked, in index order, against
/// the plant's control-relay feedback rather than the controller's own
/// intended state — matching the fault detector's "feedback wins" rule.
pub fn apply_deltas(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    outbound: &mut impl OutboundMailbox,
    k_star: usize,
) {
    if k_star > state.active_pumps() {
        for i in 0..state.pump_count() {
            if state.active_pumps() == k_star {
                break;
            }
            if feedback_at(&classified.pump_control_state, i) == Some(false) {
                state.set_pump_open(i, true);
                outbound.send(Message::new(MessageKind::OpenPump(i)));
            }
        }
    } else if k_star < state.active_pumps() {
        for i in 0..state.pump_count() {
            if state.active_pumps() == k_star {
                break;
            }
            if feedback_at(&classified.pump_control_state, i) == Some(true) {
                state.set_pump_open(i, false);
                outbound.send(Message::new(MessageKind::ClosePump(i)));
            }
        }
    }
}
