//! Wire-level message vocabulary.
//!
//! Every inbound sensor/feedback message and every outbound command the
//! controller can emit is one variant of [`MessageKind`]. This is the
//! narrow vocabulary the mailbox ports (`app::ports`) move batches of
//! for a single cycle.

/// One message on the mailbox, in either direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
}

impl Message {
    pub const fn new(kind: MessageKind) -> Self {
        Self { kind }
    }
}

impl From<MessageKind> for Message {
    fn from(kind: MessageKind) -> Self {
        Self::new(kind)
    }
}

/// The mode reported by a `Mode` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Initialisation,
    Normal,
    Degraded,
    Rescue,
    EmergencyStop,
}

/// Every message kind the controller consumes or produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind {
    // ── Inbound: sensors ──────────────────────────────────────
    /// Water level reading (volume units).
    Level(f64),
    /// Steam reading (volume/cycle-unit).
    Steam(f64),
    /// Observed physical state of pump `n`: open iff `true`.
    PumpState(usize, bool),
    /// Observed controller-relay state of pump `n`: open iff `true`.
    PumpControlState(usize, bool),

    // ── Inbound: handshake ────────────────────────────────────
    SteamBoilerWaiting,
    PhysicalUnitsReady,

    // ── Inbound: repair protocol ──────────────────────────────
    PumpRepaired(usize),
    PumpRepairedAcknowledgement(usize),
    PumpControlFailureAcknowledgement(usize),
    SteamRepaired,
    SteamOutcomeFailureAcknowledgement,
    LevelRepaired,
    LevelFailureAcknowledgement,

    // ── Outbound: mode & actuation ────────────────────────────
    Mode(ModeKind),
    OpenPump(usize),
    ClosePump(usize),
    Valve,
    ProgramReady,

    // ── Outbound: fault detection ──────────────────────────────
    PumpFailureDetection(usize),
    PumpControlFailureDetection(usize),
    SteamFailureDetection,
    LevelFailureDetection,
}

/// An owned, ordered sequence of messages — the in-memory shape of one
/// cycle's inbound or outbound batch.
pub type Batch = Vec<Message>;
