//! # NFT Mint - Supply-Limited Collectible Mint Engine
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Governs how non-fungible tokens of a fixed-size collection are created
//! during a two-phase sale: an allowlisted presale gated by a Merkle root,
//! then an open public sale. Enforces per-phase supply caps, per-address and
//! per-transaction limits, a fixed unit price, an append-only blacklist and
//! one-way metadata reveal.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Total supply equals presale plus public minted | `domain/invariants.rs` - `invariant_supply_consistent()` |
//! | INVARIANT-2 | Phase counters never exceed their caps | `domain/supply.rs` - `check_limits()` |
//! | INVARIANT-3 | Token ids are sequential from 1, never reused | `domain/supply.rs` - `assign_ids()` |
//! | INVARIANT-4 | Rejected calls change no state | `service.rs` - `try_mint()` |
//! | INVARIANT-5 | Blacklist and reveal are one-way | `domain/blacklist.rs`, `domain/sale.rs` |
//!
//! ## Mint Guards
//!
//! | Order | Guard | Failure |
//! |-------|-------|---------|
//! | 1 | Blacklist | `AccountAtBlackList` |
//! | 2 | Sale phase | `PreSaleIsNotOpen` / `PublicSaleIsNotOpen` |
//! | 3 | Allowlist proof (presale) | `InvalidProof` |
//! | 4 | Payment | `InsufficentPayment` |
//! | 5 | Supply caps | `ExceedsMax*` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `OwnershipLedger` | Assign minted ids to their holder |
//! | `Treasury` | Retain mint proceeds, refund, withdraw |
//! | `EventPublisher` | Publish state-change events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use nft_mint::prelude::*;
//!
//! let tree = MerkleTree::from_addresses(&allowlist);
//! let service = create_test_service(owner);
//! service.set_merkle_root(owner, tree.root()).await?;
//! service.set_sale(owner, SalePhase::Presale).await?;
//!
//! let proof = tree.proof(&minter).unwrap_or_default();
//! let receipt = service.mint_presale(minter, 2, &proof, price * 2).await?;
//! println!("Minted ids {:?}", receipt.token_ids().collect::<Vec<_>>());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        units, Address, BlacklistRegistry, Hash, HexParseError, LedgerError, MetadataResolver,
        MintError, Ownable, PhaseLimits, Reservation, SalePhase, SalePhaseController,
        SupplyLedger, SupplySnapshot, TokenId, TreasuryError, FIRST_TOKEN_ID, U256,
    };

    // Invariants
    pub use crate::domain::{invariant_supply_consistent, invariant_within_caps};

    // Allowlist
    pub use crate::algorithms::{keccak256, leaf_hash, verify, MerkleTree};

    // Config
    pub use crate::config::{ConfigError, MintConfig};

    // Ports
    pub use crate::ports::inbound::{MintReceipt, NftMintApi};
    pub use crate::ports::outbound::{EventPublisher, OwnershipLedger, Treasury};

    // Events
    pub use crate::events::MintEvent;

    // Adapters
    pub use crate::adapters::{InMemoryEventLog, InMemoryOwnershipLedger, InMemoryTreasury};

    // Service
    pub use crate::service::{create_test_service, MintService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
