//! Port traits — the hexagonal boundary between the domain core and the
//! mailbox transport.
//!
//! ```text
//!   Transport ──▶ InboundMailbox ──▶ ModeController (domain)
//!   ModeController (domain) ──▶ OutboundMailbox ──▶ Transport
//! ```
//!
//! The mailbox transport implementation is an external collaborator —
//! only its interface is specified here. Whatever adapter wires up the
//! real transport implements these two traits, so the domain core
//! never touches the wire directly.

use crate::message::Message;

// ───────────────────────────────────────────────────────────────
// Inbound mailbox (driven port: transport → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the cycle's inbound
/// batch. Read-only for the duration of the cycle.
pub trait InboundMailbox {
    /// Number of messages in this cycle's inbound batch.
    fn len(&self) -> usize;

    /// Read the message at position `i` (0-indexed, batch order).
    fn read(&self, i: usize) -> Message;

    /// True if the inbound batch is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ───────────────────────────────────────────────────────────────
// Outbound mailbox (driving port: domain → transport)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to append to the cycle's
/// outbound batch. Append-only — the controller never reads back what
/// it has sent.
pub trait OutboundMailbox {
    /// Append one message to the outbound batch.
    fn send(&mut self, message: Message);
}
