//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod event_log;
mod ownership_ledger;
mod treasury;

pub use event_log::InMemoryEventLog;
pub use ownership_ledger::InMemoryOwnershipLedger;
pub use treasury::InMemoryTreasury;
