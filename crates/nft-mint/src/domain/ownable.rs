//! # Ownership
//!
//! Single privileged identity guarding every admin operation.

use super::errors::MintError;
use super::value_objects::Address;

/// Owner identity. `None` once ownership has been renounced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ownable {
    owner: Option<Address>,
}

impl Ownable {
    /// Owned by `owner` (the deployer).
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self { owner: Some(owner) }
    }

    /// Current owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    /// Reject any caller that is not the owner.
    pub fn only_owner(&self, caller: Address) -> Result<(), MintError> {
        match self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => Err(MintError::OwnableUnauthorizedAccount(caller)),
        }
    }

    /// Hand ownership to `new_owner`. Returns the previous owner.
    pub fn transfer(&mut self, caller: Address, new_owner: Address) -> Result<Address, MintError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(MintError::OwnableInvalidOwner(new_owner));
        }
        self.owner = Some(new_owner);
        Ok(caller)
    }

    /// Give up ownership. Every admin operation fails afterwards.
    pub fn renounce(&mut self, caller: Address) -> Result<Address, MintError> {
        self.only_owner(caller)?;
        self.owner = None;
        Ok(caller)
    }
}
