//! # Event Schema
//!
//! State-change notifications published through the `EventPublisher` port
//! after a mutating operation has fully succeeded. Rejected operations never
//! publish.

use crate::domain::{Address, Hash, SalePhase, TokenId, U256};
use serde::{Deserialize, Serialize};

/// Mint engine event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MintEvent {
    /// Tokens were minted.
    Minted {
        /// Receiver of the tokens.
        minter: Address,
        /// Phase the mint happened in.
        phase: SalePhase,
        /// First token id of the range.
        first_token_id: TokenId,
        /// Number of tokens.
        quantity: u64,
        /// Amount paid (retained in full).
        paid: U256,
    },

    /// Address added to the blacklist.
    BlacklistAdded {
        /// Barred address.
        address: Address,
    },

    /// Sale phase overwritten.
    SaleChanged {
        /// Phase before the call.
        previous: SalePhase,
        /// Phase after the call.
        current: SalePhase,
    },

    /// Allowlist root overwritten.
    MerkleRootChanged {
        /// Root before the call.
        previous: Hash,
        /// Root after the call.
        current: Hash,
    },

    /// Collection metadata revealed.
    Revealed,

    /// Owner changed (`new_owner` is `None` on renounce).
    OwnershipTransferred {
        /// Owner before the call.
        previous_owner: Address,
        /// Owner after the call.
        new_owner: Option<Address>,
    },

    /// Retained funds forwarded to the owner.
    Withdrawn {
        /// Recipient (the owner).
        to: Address,
        /// Amount forwarded.
        amount: U256,
    },
}

impl MintEvent {
    /// Event topic name.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Minted { .. } => "minted",
            Self::BlacklistAdded { .. } => "blacklist_added",
            Self::SaleChanged { .. } => "sale_changed",
            Self::MerkleRootChanged { .. } => "merkle_root_changed",
            Self::Revealed => "revealed",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::Withdrawn { .. } => "withdrawn",
        }
    }
}
