//! # Domain Module
//!
//! Core domain types for the mint engine: guards, counters, metadata.

pub mod blacklist;
pub mod errors;
pub mod invariants;
pub mod metadata;
pub mod ownable;
pub mod sale;
pub mod supply;
pub mod value_objects;

pub use blacklist::BlacklistRegistry;
pub use errors::*;
pub use invariants::*;
pub use metadata::MetadataResolver;
pub use ownable::Ownable;
pub use sale::SalePhaseController;
pub use supply::{PhaseLimits, Reservation, SupplyLedger, SupplySnapshot, FIRST_TOKEN_ID};
pub use value_objects::*;
