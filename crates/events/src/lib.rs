//! Ledger events and the journal envelope they are recorded in.

pub mod envelope;
pub mod event;

pub use envelope::EventEnvelope;
pub use event::Event;
