//! Treasury Adapter
//!
//! In-memory value-transfer primitive: retains mint payments and records
//! payouts per recipient.

use crate::domain::{Address, TreasuryError, U256};
use crate::ports::outbound::Treasury;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// In-memory treasury.
#[derive(Debug, Default)]
pub struct InMemoryTreasury {
    balance: RwLock<U256>,
    /// Total received per payer.
    deposits: RwLock<HashMap<Address, U256>>,
    /// Total forwarded per recipient.
    payouts: RwLock<HashMap<Address, U256>>,
}

impl InMemoryTreasury {
    /// Create an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total deposited by `payer`.
    #[must_use]
    pub fn deposited_by(&self, payer: &Address) -> U256 {
        self.deposits.read().get(payer).copied().unwrap_or_default()
    }

    /// Total forwarded to `recipient`.
    #[must_use]
    pub fn paid_out_to(&self, recipient: &Address) -> U256 {
        self.payouts.read().get(recipient).copied().unwrap_or_default()
    }
}

#[async_trait]
impl Treasury for InMemoryTreasury {
    async fn deposit(&self, from: Address, amount: U256) -> Result<(), TreasuryError> {
        let mut balance = self.balance.write();
        *balance = balance.checked_add(amount).ok_or(TreasuryError::Overflow)?;

        let mut deposits = self.deposits.write();
        let entry = deposits.entry(from).or_default();
        *entry = entry.saturating_add(amount);

        debug!(from = %from, %amount, "Payment retained");
        Ok(())
    }

    async fn refund(&self, to: Address, amount: U256) -> Result<(), TreasuryError> {
        let mut balance = self.balance.write();
        *balance = balance
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientFunds {
                requested: amount,
                available: *balance,
            })?;

        let mut deposits = self.deposits.write();
        if let Some(entry) = deposits.get_mut(&to) {
            *entry = entry.saturating_sub(amount);
        }

        debug!(to = %to, %amount, "Payment refunded");
        Ok(())
    }

    async fn balance(&self) -> U256 {
        *self.balance.read()
    }

    async fn withdraw_to(&self, recipient: Address) -> Result<U256, TreasuryError> {
        let amount = std::mem::take(&mut *self.balance.write());

        let mut payouts = self.payouts.write();
        let entry = payouts.entry(recipient).or_default();
        *entry = entry.saturating_add(amount);

        info!(to = %recipient, %amount, "Treasury withdrawn");
        Ok(amount)
    }
}
