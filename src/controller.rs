//! Mode controller — the top-level supervisory state machine.
//!
//! `ModeController` is constructed once from a [`BoilerCharacteristics`]
//! and exposes one per-cycle entry point, [`ModeController::clock`],
//! plus a status query. Each mode has its own handler function
//! (`waiting_cycle`, `ready_cycle`, ...) dispatched from `clock` on the
//! current mode. Unlike a table-driven FSM engine consulted by a
//! shared tick loop, these handlers append straight to the outbound
//! mailbox in-line, since message ordering within the cycle is part of
//! the observable contract.

use heapless::Vec as HVec;
use log::{info, warn};

use crate::app::ports::{InboundMailbox, OutboundMailbox};
use crate::classifier::{classify, ClassifiedBatch};
use crate::config::{BoilerCharacteristics, MAX_PUMPS};
use crate::fault::{self, Failure};
use crate::message::{Message, MessageKind, ModeKind};
use crate::predictor;
use crate::selector;
use crate::validator;

/// The supervisory mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Waiting,
    Ready,
    Normal,
    Degraded,
    Rescue,
    EmergencyStop,
}

/// The controller's mutable state, owned exclusively by `ModeController`.
pub struct ControllerState {
    pub mode: Mode,
    pub failure: Option<Failure>,
    pub water_level: f64,
    pub prev_water_level: f64,
    pub steam_level: f64,
    pub prev_steam_level: f64,
    pump_open: HVec<bool, MAX_PUMPS>,
    active_pumps: usize,
    pub valve_open: bool,
    pub initialized: bool,
    pub ideal_predicted_water: f64,
    pub prev_ideal_predicted_water: f64,
}

impl ControllerState {
    pub fn new(pump_count: usize) -> Self {
        let mut pump_open = HVec::new();
        for _ in 0..pump_count {
            pump_open.push(false).expect("pump_count is bounded by MAX_PUMPS");
        }
        Self {
            mode: Mode::Waiting,
            failure: None,
            water_level: 0.0,
            prev_water_level: 0.0,
            steam_level: 0.0,
            prev_steam_level: 0.0,
            pump_open,
            active_pumps: 0,
            valve_open: false,
            initialized: false,
            ideal_predicted_water: 0.0,
            prev_ideal_predicted_water: 0.0,
        }
    }

    pub fn pump_count(&self) -> usize {
        self.pump_open.len()
    }

    pub fn pump_open(&self, i: usize) -> bool {
        self.pump_open[i]
    }

    /// Count of `true` entries in `pump_open` — invariant I1 is
    /// maintained structurally: every write to `pump_open` goes through
    /// this method, which keeps `active_pumps` in lock-step rather than
    /// leaving callers to recompute it.
    pub fn active_pumps(&self) -> usize {
        self.active_pumps
    }

    pub fn set_pump_open(&mut self, i: usize, open: bool) {
        let was_open = self.pump_open[i];
        self.pump_open[i] = open;
        match (was_open, open) {
            (false, true) => self.active_pumps += 1,
            (true, false) => self.active_pumps -= 1,
            _ => {}
        }
    }
}

/// The per-cycle steam-boiler supervisor.
pub struct ModeController {
    characteristics: BoilerCharacteristics,
    state: ControllerState,
}

impl ModeController {
    pub fn new(characteristics: BoilerCharacteristics) -> Self {
        let state = ControllerState::new(characteristics.number_of_pumps());
        Self { characteristics, state }
    }

    /// Run one cycle: classify the inbound batch, validate it, dispatch
    /// to the current mode's handler, and append the trailing mode
    /// message. The only entry point — runs to completion, never blocks.
    pub fn clock(&mut self, inbound: &impl InboundMailbox, outbound: &mut impl OutboundMailbox) {
        if self.state.mode == Mode::EmergencyStop {
            outbound.send(Message::new(MessageKind::Mode(ModeKind::EmergencyStop)));
            return;
        }

        let classified = classify(inbound);

        if !validator::is_valid(&classified, self.characteristics.number_of_pumps()) {
            warn!("transmission failure: inbound batch rejected, entering emergency stop");
            self.state.mode = Mode::EmergencyStop;
            outbound.send(Message::new(MessageKind::Mode(ModeKind::EmergencyStop)));
            return;
        }

        match self.state.mode {
            Mode::Waiting => waiting_cycle(&mut self.state, &classified, &self.characteristics, outbound),
            Mode::Ready => ready_cycle(&mut self.state, &classified, &self.characteristics, outbound),
            Mode::Normal => normal_cycle(&mut self.state, &classified, &self.characteristics, outbound),
            Mode::Degraded => degraded_cycle(&mut self.state, &classified, &self.characteristics, outbound),
            Mode::Rescue => rescue_cycle(&mut self.state, &classified, &self.characteristics, outbound),
            Mode::EmergencyStop => unreachable!("handled above"),
        }

        if self.state.mode == Mode::EmergencyStop {
            outbound.send(Message::new(MessageKind::Mode(ModeKind::EmergencyStop)));
        } else {
            outbound.send(Message::new(MessageKind::Mode(ModeKind::Initialisation)));
        }
    }

    /// Human-readable status, currently the mode name. Not part of the
    /// safety protocol.
    pub fn status_message(&self) -> String {
        format!("{:?}", self.state.mode)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }
}

fn assign_levels(state: &mut ControllerState, classified: &ClassifiedBatch) {
    state.prev_water_level = state.water_level;
    state.water_level = classified.level.expect("transmission validated this cycle");
    state.prev_steam_level = state.steam_level;
    state.steam_level = classified.steam.expect("transmission validated this cycle");
}

fn run_predictor_and_selector(
    state: &mut ControllerState,
    characteristics: &BoilerCharacteristics,
    classified: &ClassifiedBatch,
    outbound: &mut impl OutboundMailbox,
) {
    let candidates = predictor::predict(state.water_level, state.steam_level, characteristics);
    let k_star = selector::select_k(&candidates, characteristics.normal_mid_level());
    state.prev_ideal_predicted_water = state.ideal_predicted_water;
    state.ideal_predicted_water = candidates[k_star].mid;
    selector::apply_deltas(state, classified, outbound, k_star);
}

/// Check whether the plant sent the repair notice matching the
/// controller's current `failure`, and if so return to `NORMAL`.
fn handle_repair(state: &mut ControllerState, classified: &ClassifiedBatch, outbound: &mut impl OutboundMailbox) {
    let repaired = match state.failure {
        Some(Failure::PumpState { pump }) | Some(Failure::PumpControlState { pump }) => {
            classified.pump_repaired.contains(&pump)
        }
        Some(Failure::SteamLevel) => classified.steam_repaired,
        Some(Failure::WaterLevel) => classified.level_repaired,
        None => false,
    };
    if repaired {
        info!("repair notice received, returning to normal");
        state.failure = None;
        state.mode = Mode::Normal;
        outbound.send(Message::new(MessageKind::Mode(ModeKind::Normal)));
    }
}

/// WAITING → READY. Runs the initialization handshake: open the valve
/// if the drum starts over-full, open every pump if it starts under the
/// normal band, or declare readiness once the level already sits inside
/// the band.
fn waiting_cycle(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) {
    if !classified.steam_boiler_waiting {
        return;
    }

    let level = classified.level.expect("transmission validated this cycle");
    if level < 0.0 || level >= characteristics.capacity() {
        warn!("sensor-init failure: water level reading {level} out of range");
        state.mode = Mode::EmergencyStop;
        return;
    }
    state.water_level = level;

    if level > characteristics.maximal_normal_level() && !state.valve_open {
        state.valve_open = true;
        outbound.send(Message::new(MessageKind::Valve));
    } else if level < characteristics.minimal_normal_level() {
        for i in 0..state.pump_count() {
            state.set_pump_open(i, true);
            outbound.send(Message::new(MessageKind::OpenPump(i)));
        }
    }

    if level >= characteristics.minimal_normal_level() && level <= characteristics.maximal_normal_level() {
        info!("water level in normal band, entering ready");
        state.mode = Mode::Ready;
        outbound.send(Message::new(MessageKind::ProgramReady));
    }
}

/// READY → NORMAL. Assigns the steam reading, demotes to DEGRADED on an
/// out-of-band first steam reading, else waits for the plant's readiness
/// handshake.
fn ready_cycle(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) {
    if let Some(steam) = classified.steam {
        state.prev_steam_level = state.steam_level;
        state.steam_level = steam;
        if state.steam_level < state.prev_steam_level || state.steam_level > characteristics.maximal_steam_rate() {
            warn!("steam fault detected while in ready");
            state.failure = Some(Failure::SteamLevel);
            state.mode = Mode::Degraded;
            outbound.send(Message::new(MessageKind::SteamFailureDetection));
            outbound.send(Message::new(MessageKind::Mode(ModeKind::Degraded)));
            return;
        }
    }

    if classified.physical_units_ready {
        info!("physical units ready, entering normal");
        state.initialized = true;
        state.mode = Mode::Normal;
        outbound.send(Message::new(MessageKind::Mode(ModeKind::Normal)));
    }
}

fn normal_cycle(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) {
    assign_levels(state, classified);
    let healthy = fault::detect(state, classified, characteristics, outbound);

    match state.mode {
        Mode::Degraded => {
            warn!("fault detected in normal, demoting to degraded");
            outbound.send(Message::new(MessageKind::Mode(ModeKind::Degraded)));
        }
        Mode::Rescue => {
            warn!("water-level fault detected in normal, demoting to rescue");
            outbound.send(Message::new(MessageKind::Mode(ModeKind::Rescue)));
        }
        _ => {}
    }

    if healthy {
        run_predictor_and_selector(state, characteristics, classified, outbound);
    }
}

fn degraded_cycle(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) {
    assign_levels(state, classified);
    let healthy = fault::detect(state, classified, characteristics, outbound);

    if state.mode == Mode::Rescue {
        warn!("water-level fault detected while degraded, escalating to rescue");
        outbound.send(Message::new(MessageKind::Mode(ModeKind::Rescue)));
    }

    if state.mode == Mode::Degraded {
        handle_repair(state, classified, outbound);
    }

    if healthy {
        run_predictor_and_selector(state, characteristics, classified, outbound);
    }
}

fn rescue_cycle(
    state: &mut ControllerState,
    classified: &ClassifiedBatch,
    characteristics: &BoilerCharacteristics,
    outbound: &mut impl OutboundMailbox,
) {
    assign_levels(state, classified);
    let healthy = fault::detect(state, classified, characteristics, outbound);

    if state.mode == Mode::Degraded {
        warn!("fault detected while in rescue, demoting to degraded");
        outbound.send(Message::new(MessageKind::Mode(ModeKind::Degraded)));
    }

    if state.mode == Mode::Rescue {
        handle_repair(state, classified, outbound);
    }

    if healthy {
        run_predictor_and_selector(state, characteristics, classified, outbound);
    }
}
