//! Ownership Ledger Adapter
//!
//! In-memory `OwnershipLedger`. Production deployments back this with the
//! token ledger proper; transfers and approvals live there, not here.

use crate::domain::{Address, LedgerError, TokenId};
use crate::ports::outbound::OwnershipLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// In-memory ownership ledger.
#[derive(Debug, Default)]
pub struct InMemoryOwnershipLedger {
    /// token id -> holder
    owners: RwLock<HashMap<TokenId, Address>>,
    /// holder -> token count
    balances: RwLock<HashMap<Address, u64>>,
    /// Simulated outage for tests.
    unavailable: AtomicBool,
}

impl InMemoryOwnershipLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `mint_range` fail (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of minted tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.owners.read().len()
    }
}

#[async_trait]
impl OwnershipLedger for InMemoryOwnershipLedger {
    async fn mint_range(
        &self,
        owner: Address,
        start_id: TokenId,
        count: u64,
    ) -> Result<(), LedgerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("simulated outage".to_string()));
        }
        if owner.is_zero() {
            return Err(LedgerError::MintToZeroAddress);
        }
        if count == 0 {
            return Err(LedgerError::MintZeroQuantity);
        }

        let end_id = start_id
            .checked_add(count)
            .ok_or(LedgerError::IdRangeOverflow { start_id, count })?;

        let mut owners = self.owners.write();
        let range = start_id..end_id;
        if let Some(taken) = range.clone().find(|id| owners.contains_key(id)) {
            return Err(LedgerError::TokenAlreadyMinted(taken));
        }

        for id in range {
            owners.insert(id, owner);
        }
        *self.balances.write().entry(owner).or_insert(0) += count;

        debug!(owner = %owner, start_id, count, "Ledger range minted");
        Ok(())
    }

    async fn balance_of(&self, owner: Address) -> u64 {
        self.balances.read().get(&owner).copied().unwrap_or(0)
    }

    async fn owner_exists(&self, token_id: TokenId) -> bool {
        self.owners.read().contains_key(&token_id)
    }

    async fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.owners.read().get(&token_id).copied()
    }
}
