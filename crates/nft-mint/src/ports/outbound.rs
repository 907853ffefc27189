//! # Outbound Ports
//!
//! Collaborators the mint engine depends on but does not implement:
//! the ownership ledger, the value-transfer primitive and the event sink.
//!
//! The engine calls these while holding its write guard, so an
//! implementation must not call back into the engine.

use crate::domain::{Address, LedgerError, TokenId, TreasuryError, U256};
use crate::events::MintEvent;
use async_trait::async_trait;

/// Non-fungible ownership ledger.
#[async_trait]
pub trait OwnershipLedger: Send + Sync {
    /// Assign `count` consecutive ids starting at `start_id` to `owner`.
    async fn mint_range(
        &self,
        owner: Address,
        start_id: TokenId,
        count: u64,
    ) -> Result<(), LedgerError>;

    /// Number of tokens held by `owner`.
    async fn balance_of(&self, owner: Address) -> u64;

    /// Whether `token_id` has been minted.
    async fn owner_exists(&self, token_id: TokenId) -> bool;

    /// Holder of `token_id`, if minted.
    async fn owner_of(&self, token_id: TokenId) -> Option<Address>;
}

/// Value-transfer primitive holding mint proceeds.
#[async_trait]
pub trait Treasury: Send + Sync {
    /// Retain `amount` sent by `from` with a successful mint.
    async fn deposit(&self, from: Address, amount: U256) -> Result<(), TreasuryError>;

    /// Return a deposit whose mint could not be committed.
    async fn refund(&self, to: Address, amount: U256) -> Result<(), TreasuryError>;

    /// Retained balance.
    async fn balance(&self) -> U256;

    /// Forward the whole balance to `recipient`. Returns the amount sent.
    async fn withdraw_to(&self, recipient: Address) -> Result<U256, TreasuryError>;
}

/// Sink for state-change events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Delivery is best-effort.
    async fn publish(&self, event: MintEvent);
}
