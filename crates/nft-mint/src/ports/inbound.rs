//! # Inbound Ports
//!
//! API trait defining what the mint engine can do. Every operation takes
//! the caller identity explicitly.

use crate::domain::{Address, Hash, MintError, SalePhase, TokenId, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a successful mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Receiver of the tokens.
    pub minter: Address,
    /// Phase the mint happened in.
    pub phase: SalePhase,
    /// First token id of the range.
    pub first_token_id: TokenId,
    /// Number of tokens minted.
    pub quantity: u64,
    /// Amount paid (retained in full, no refund).
    pub paid: U256,
}

impl MintReceipt {
    /// Minted ids, in order. Receipts from the engine never end past
    /// `TokenId::MAX`; a hand-built one is clamped there.
    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> {
        self.first_token_id..self.first_token_id.saturating_add(self.quantity)
    }
}

/// Mint engine API - inbound port.
#[async_trait]
pub trait NftMintApi: Send + Sync {
    /// Allowlisted mint during presale.
    ///
    /// Guards run in order: blacklist, phase, proof, payment, then the
    /// presale caps. A `quantity` of zero fails with
    /// `MintError::MintZeroQuantity` before any cap is consulted.
    async fn mint_presale(
        &self,
        caller: Address,
        quantity: u64,
        proof: &[Hash],
        paid: U256,
    ) -> Result<MintReceipt, MintError>;

    /// Open mint during public sale.
    ///
    /// Same guard order as [`mint_presale`](Self::mint_presale) without the
    /// proof step. A zero `quantity` fails with `MintError::MintZeroQuantity`.
    async fn mint_public(
        &self,
        caller: Address,
        quantity: u64,
        paid: U256,
    ) -> Result<MintReceipt, MintError>;

    /// Owner-only: bar `address` from minting.
    async fn add_to_black_list(&self, caller: Address, address: Address)
        -> Result<(), MintError>;

    /// Owner-only: overwrite the sale phase.
    async fn set_sale(&self, caller: Address, phase: SalePhase) -> Result<(), MintError>;

    /// Owner-only: overwrite the allowlist root.
    async fn set_merkle_root(&self, caller: Address, root: Hash) -> Result<(), MintError>;

    /// Owner-only: expose per-token metadata. Idempotent.
    async fn reveal_collection(&self, caller: Address) -> Result<(), MintError>;

    /// Owner-only: hand ownership to `new_owner`.
    async fn transfer_ownership(&self, caller: Address, new_owner: Address)
        -> Result<(), MintError>;

    /// Owner-only: give up ownership permanently.
    async fn renounce_ownership(&self, caller: Address) -> Result<(), MintError>;

    /// Owner-only: forward retained proceeds to the owner.
    async fn withdraw(&self, caller: Address) -> Result<U256, MintError>;

    /// Metadata location for a minted token.
    async fn token_uri(&self, token_id: TokenId) -> Result<String, MintError>;

    /// Blacklist membership.
    async fn is_at_black_list(&self, address: Address) -> bool;

    /// Active sale phase.
    async fn sale(&self) -> SalePhase;

    /// Committed allowlist root.
    async fn merkle_root(&self) -> Hash;

    /// Reveal flag.
    async fn revealed(&self) -> bool;

    /// Current owner, `None` once renounced.
    async fn owner(&self) -> Option<Address>;

    /// Tokens held by `address`.
    async fn balance_of(&self, address: Address) -> u64;

    /// Tokens minted so far.
    async fn total_supply(&self) -> u64;
}
