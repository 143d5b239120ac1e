//! Shared mock mailbox for scenario tests — records every outbound
//! send so assertions can inspect the full per-cycle batch.

use steam_boiler_core::app::ports::{InboundMailbox, OutboundMailbox};
use steam_boiler_core::message::Message;

pub struct VecInbox(pub Vec<Message>);

impl InboundMailbox for VecInbox {
    fn len(&self) -> usize {
        self.0.len()
    }
    fn read(&self, i: usize) -> Message {
        self.0[i]
    }
}

#[derive(Default)]
pub struct RecordingOutbox(pub Vec<Message>);

impl OutboundMailbox for RecordingOutbox {
    fn send(&mut self, message: Message) {
        self.0.push(message);
    }
}
