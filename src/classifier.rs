//! Message classifier.
//!
//! Partitions a cycle's inbound batch into the kinds the controller
//! cares about. The classifier never reorders messages — pump-state and
//! pump-control-state arrays are handed back in batch order, and
//! callers assume index `i` of an extracted array corresponds to pump
//! `i` (the mailbox transport is responsible for tagging them that way;
//! this module only filters).

use crate::app::ports::InboundMailbox;
use crate::message::MessageKind;

/// A singleton-kind extraction result: "more than one" and "none" both
/// collapse to `None`; callers distinguish by context (the transmission
/// validator treats both as "absent").
pub fn extract_unique<T>(
    mailbox: &impl InboundMailbox,
    mut matches: impl FnMut(MessageKind) -> Option<T>,
) -> Option<T> {
    let mut found = None;
    for i in 0..mailbox.len() {
        if let Some(value) = matches(mailbox.read(i).kind) {
            if found.is_some() {
                return None;
            }
            found = Some(value);
        }
    }
    found
}

/// Extract every message matching `matches`, preserving batch order.
pub fn extract_all<T>(
    mailbox: &impl InboundMailbox,
    mut matches: impl FnMut(MessageKind) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::new();
    for i in 0..mailbox.len() {
        if let Some(value) = matches(mailbox.read(i).kind) {
            out.push(value);
        }
    }
    out
}

/// The level and steam readings, plus the two per-pump feedback arrays,
/// extracted from one cycle's inbound batch.
#[derive(Debug, Clone)]
pub struct ClassifiedBatch {
    pub level: Option<f64>,
    pub steam: Option<f64>,
    /// `(pump index, open)` pairs, in batch order.
    pub pump_state: Vec<(usize, bool)>,
    /// `(pump index, open)` pairs, in batch order.
    pub pump_control_state: Vec<(usize, bool)>,
    pub steam_boiler_waiting: bool,
    pub physical_units_ready: bool,
    pub pump_repaired: Vec<usize>,
    pub steam_repaired: bool,
    pub level_repaired: bool,
}

/// Find the first `(index, value)` pair in `pairs` whose index is `i`.
/// Used to look up one pump's feedback inside a batch-ordered array
/// without assuming it was appended in index order.
pub fn feedback_at(pairs: &[(usize, bool)], i: usize) -> Option<bool> {
    pairs.iter().find(|&&(idx, _)| idx == i).map(|&(_, v)| v)
}

/// Classify one cycle's inbound batch.
pub fn classify(mailbox: &impl InboundMailbox) -> ClassifiedBatch {
    let level = extract_unique(mailbox, |k| match k {
        MessageKind::Level(v) => Some(v),
        _ => None,
    });
    let steam = extract_unique(mailbox, |k| match k {
        MessageKind::Steam(v) => Some(v),
        _ => None,
    });
    let pump_state = extract_all(mailbox, |k| match k {
        MessageKind::PumpState(i, open) => Some((i, open)),
        _ => None,
    });
    let pump_control_state = extract_all(mailbox, |k| match k {
        MessageKind::PumpControlState(i, open) => Some((i, open)),
        _ => None,
    });
    let steam_boiler_waiting =
        extract_unique(mailbox, |k| matches!(k, MessageKind::SteamBoilerWaiting).then_some(()))
            .is_some();
    let physical_units_ready =
        extract_unique(mailbox, |k| matches!(k, MessageKind::PhysicalUnitsReady).then_some(()))
            .is_some();
    let pump_repaired = extract_all(mailbox, |k| match k {
        MessageKind::PumpRepaired(i) => Some(i),
        _ => None,
    });
    let steam_repaired =
        extract_unique(mailbox, |k| matches!(k, MessageKind::SteamRepaired).then_some(())).is_some();
    let level_repaired =
        extract_unique(mailbox, |k| matches!(k, MessageKind::LevelRepaired).then_some(())).is_some();

    ClassifiedBatch {
        level,
        steam,
        pump_state,
        pump_control_state,
        steam_boiler_waiting,
        physical_units_ready,
        pump_repaired,
        steam_repaired,
        level_repaired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    struct VecMailbox(Vec<Message>);
    impl InboundMailbox for VecMailbox {
        fn len(&self) -> usize {
            self.0.len()
        }
        fn read(&self, i: usize) -> Message {
            self.0[i]
        }
    }

    #[test]
    fn unique_absent_when_none_present() {
        let mailbox = VecMailbox(vec![]);
        let level = extract_unique(&mailbox, |k| match k {
            MessageKind::Level(v) => Some(v),
            _ => None,
        });
        assert_eq!(level, None);
    }

    #[test]
    fn unique_absent_when_duplicated() {
        let mailbox = VecMailbox(vec![
            Message::new(MessageKind::Level(1.0)),
            Message::new(MessageKind::Level(2.0)),
        ]);
        let level = extract_unique(&mailbox, |k| match k {
            MessageKind::Level(v) => Some(v),
            _ => None,
        });
        assert_eq!(level, None);
    }

    #[test]
    fn extract_all_preserves_batch_order() {
        let mailbox = VecMailbox(vec![
            Message::new(MessageKind::PumpState(1, true)),
            Message::new(MessageKind::PumpState(0, false)),
        ]);
        let states = extract_all(&mailbox, |k| match k {
            MessageKind::PumpState(i, open) => Some((i, open)),
            _ => None,
        });
        assert_eq!(states, vec![(1, true), (0, false)]);
    }

    #[test]
    fn classify_pulls_every_field() {
        let mailbox = VecMailbox(vec![
            Message::new(MessageKind::Level(400.0)),
            Message::new(MessageKind::Steam(3.0)),
            Message::new(MessageKind::PumpState(0, true)),
            Message::new(MessageKind::PumpControlState(0, true)),
            Message::new(MessageKind::SteamBoilerWaiting),
        ]);
        let classified = classify(&mailbox);
        assert_eq!(classified.level, Some(400.0));
        assert_eq!(classified.steam, Some(3.0));
        assert_eq!(classified.pump_state, vec![(0, true)]);
        assert_eq!(classified.pump_control_state, vec![(0, true)]);
        assert!(classified.steam_boiler_waiting);
        assert!(!classified.physical_units_ready);
    }
}
