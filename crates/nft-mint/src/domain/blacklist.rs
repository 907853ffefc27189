//! # Blacklist Registry
//!
//! Append-only set of addresses barred from minting. There is no removal.

use super::errors::MintError;
use super::value_objects::Address;
use std::collections::HashSet;

/// Addresses permanently barred from minting.
#[derive(Clone, Debug, Default)]
pub struct BlacklistRegistry {
    entries: HashSet<Address>,
}

impl BlacklistRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `address`. Re-adding a member is an error, not a no-op.
    pub fn add(&mut self, address: Address) -> Result<(), MintError> {
        if !self.entries.insert(address) {
            return Err(MintError::AddressAlreadyAdded(address));
        }
        Ok(())
    }

    /// Membership lookup.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.entries.contains(address)
    }

    /// Number of barred addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nobody is barred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
