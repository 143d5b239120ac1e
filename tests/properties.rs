//! Property-based tests for the universal invariants.

mod support;

use proptest::prelude::*;
use steam_boiler_core::config::BoilerCharacteristics;
use steam_boiler_core::controller::{Mode, ModeController};
use steam_boiler_core::message::{Message, MessageKind, ModeKind};
use support::{RecordingOutbox, VecInbox};

fn characteristics() -> BoilerCharacteristics {
    BoilerCharacteristics::new(1000.0, 50.0, 800.0, 200.0, 600.0, 5.0, vec![10.0, 10.0]).unwrap()
}

fn full_batch(level: Option<f64>, steam: Option<f64>, pump_states: &[bool], pump_controls: &[bool]) -> VecInbox {
    let mut messages = Vec::new();
    if let Some(level) = level {
        messages.push(Message::new(MessageKind::Level(level)));
    }
    if let Some(steam) = steam {
        messages.push(Message::new(MessageKind::Steam(steam)));
    }
    for (i, &open) in pump_states.iter().enumerate() {
        messages.push(Message::new(MessageKind::PumpState(i, open)));
    }
    for (i, &open) in pump_controls.iter().enumerate() {
        messages.push(Message::new(MessageKind::PumpControlState(i, open)));
    }
    VecInbox(messages)
}

fn drive_to_normal(controller: &mut ModeController) {
    let mut scratch = RecordingOutbox::default();
    controller.clock(
        &VecInbox(vec![
            Message::new(MessageKind::SteamBoilerWaiting),
            Message::new(MessageKind::Level(400.0)),
            Message::new(MessageKind::Steam(0.0)),
            Message::new(MessageKind::PumpState(0, false)),
            Message::new(MessageKind::PumpState(1, false)),
            Message::new(MessageKind::PumpControlState(0, false)),
            Message::new(MessageKind::PumpControlState(1, false)),
        ]),
        &mut scratch,
    );
    let mut scratch = RecordingOutbox::default();
    controller.clock(
        &full_batch(Some(400.0), Some(0.0), &[false, false], &[false, false])
            .tagged_with(MessageKind::PhysicalUnitsReady),
        &mut scratch,
    );
    assert_eq!(controller.state().mode, Mode::Normal);
}

trait TagExt {
    fn tagged_with(self, extra: MessageKind) -> Self;
}
impl TagExt for VecInbox {
    fn tagged_with(mut self, extra: MessageKind) -> Self {
        self.0.push(Message::new(extra));
        self
    }
}

proptest! {
    /// P4 (transmission gate): any batch missing level, steam, or with a
    /// mis-sized pump array forces EMERGENCY_STOP.
    #[test]
    fn p4_transmission_gate(level in 0.0f64..900.0, steam in 0.0f64..5.0, drop_level in any::<bool>(), drop_steam in any::<bool>()) {
        prop_assume!(drop_level || drop_steam);
        let mut controller = ModeController::new(characteristics());
        let batch = full_batch(
            if drop_level { None } else { Some(level) },
            if drop_steam { None } else { Some(steam) },
            &[false, false],
            &[false, false],
        );
        let mut outbound = RecordingOutbox::default();
        controller.clock(&batch, &mut outbound);
        prop_assert_eq!(controller.state().mode, Mode::EmergencyStop);
    }

    /// P1 (terminal): once EMERGENCY_STOP, every subsequent cycle emits
    /// exactly one message.
    #[test]
    fn p1_emergency_stop_is_terminal(n_cycles in 1usize..5) {
        let mut controller = ModeController::new(characteristics());
        let empty = VecInbox(vec![]);
        let mut first = RecordingOutbox::default();
        controller.clock(&empty, &mut first);
        prop_assert_eq!(controller.state().mode, Mode::EmergencyStop);

        for _ in 0..n_cycles {
            let mut outbound = RecordingOutbox::default();
            controller.clock(&empty, &mut outbound);
            prop_assert_eq!(outbound.0, vec![Message::new(MessageKind::Mode(ModeKind::EmergencyStop))]);
        }
    }

    /// P2 (trailing mode): every non-emergency cycle's last message is
    /// MODE=INITIALISATION.
    #[test]
    fn p2_trailing_mode_is_initialisation(level in 200.0f64..600.0) {
        let mut controller = ModeController::new(characteristics());
        let batch = full_batch(Some(level), Some(0.0), &[false, false], &[false, false])
            .tagged_with(MessageKind::SteamBoilerWaiting);
        let mut outbound = RecordingOutbox::default();
        controller.clock(&batch, &mut outbound);
        prop_assume!(controller.state().mode != Mode::EmergencyStop);
        prop_assert_eq!(outbound.0.last(), Some(&Message::new(MessageKind::Mode(ModeKind::Initialisation))));
    }

    /// P6 (feedback wins): after a pump-state mismatch on pump i,
    /// pump_open[i] equals the observed feedback for the rest of the cycle.
    #[test]
    fn p6_feedback_wins_on_mismatch(observed in any::<bool>()) {
        let mut controller = ModeController::new(characteristics());
        drive_to_normal(&mut controller);

        let batch = full_batch(Some(400.0), Some(0.0), &[observed, false], &[false, false]);
        let mut outbound = RecordingOutbox::default();
        controller.clock(&batch, &mut outbound);

        prop_assert_eq!(controller.state().pump_open(0), observed);
    }

    /// P3 (invariant I1): after every cycle, active_pumps equals the
    /// count of true entries in pump_open.
    #[test]
    fn p3_active_pumps_matches_popcount(steam in 0.0f64..5.0, p0 in any::<bool>(), p1 in any::<bool>()) {
        let mut controller = ModeController::new(characteristics());
        drive_to_normal(&mut controller);

        let batch = full_batch(Some(400.0), Some(steam), &[p0, p1], &[p0, p1]);
        let mut outbound = RecordingOutbox::default();
        controller.clock(&batch, &mut outbound);

        let popcount = usize::from(controller.state().pump_open(0)) + usize::from(controller.state().pump_open(1));
        prop_assert_eq!(controller.state().active_pumps(), popcount);
    }

    /// P8 (safety envelope): once initialized, any level outside the
    /// limit envelope (but not negative, which forces RESCUE instead)
    /// ends in EMERGENCY_STOP.
    #[test]
    fn p8_safety_envelope(level in 801.0f64..900.0) {
        let mut controller = ModeController::new(characteristics());
        drive_to_normal(&mut controller);

        let batch = full_batch(Some(level), Some(0.0), &[false, false], &[false, false]);
        let mut outbound = RecordingOutbox::default();
        controller.clock(&batch, &mut outbound);

        prop_assert_eq!(controller.state().mode, Mode::EmergencyStop);
    }
}
