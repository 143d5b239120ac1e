//! Application boundary — pure domain logic, zero I/O.
//!
//! The mailbox transport interacts with the domain exclusively through
//! the **port traits** defined in [`ports`], keeping the supervisory
//! core fully testable without a real transport.

pub mod ports;
