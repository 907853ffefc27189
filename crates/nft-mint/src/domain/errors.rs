//! # Domain Errors
//!
//! Structured failure kinds for the mint engine. Every variant carries the
//! context a caller needs to branch on it (offending address, amount, cap).

use super::value_objects::{Address, TokenId, U256};
use thiserror::Error;

/// Errors returned by mint and admin operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    /// Caller is permanently barred from minting.
    #[error("account {0} is on the blacklist")]
    AccountAtBlackList(Address),

    /// Presale mint attempted outside the presale phase.
    #[error("presale is not open")]
    PreSaleIsNotOpen,

    /// Public mint attempted outside the public sale phase.
    #[error("public sale is not open")]
    PublicSaleIsNotOpen,

    /// Allowlist proof did not verify against the committed root.
    #[error("invalid allowlist proof for {0}")]
    InvalidProof(Address),

    /// Paid amount is below `price * quantity`.
    #[error("insufficient payment from {0}: paid {1} wei")]
    InsufficentPayment(Address, U256),

    /// Presale supply cap would be exceeded. Carries the cap.
    #[error("exceeds max presale supply of {0}")]
    ExceedsMaxSupplyPresale(u64),

    /// Per-address presale cap would be exceeded.
    #[error("exceeds max presale quantity for {0}")]
    ExceedsMaxQuantityPerAddressPresale(Address),

    /// Presale per-transaction cap exceeded.
    #[error("exceeds max presale quantity per transaction for {0}")]
    ExceedsMaxQuantityPerPresaleTransaction(Address),

    /// Public supply cap would be exceeded. Carries the cap.
    #[error("exceeds max public sale supply of {0}")]
    ExceedsMaxSupplyPublicSale(u64),

    /// Per-address public cap would be exceeded.
    #[error("exceeds max public quantity for {0}")]
    ExceedsMaxQuantityPerAddressPublic(Address),

    /// Public per-transaction cap exceeded.
    #[error("exceeds max public quantity per transaction for {0}")]
    ExceedsMaxQuantityPerPublicTransaction(Address),

    /// A mint of zero tokens was requested.
    #[error("mint quantity must be non-zero")]
    MintZeroQuantity,

    /// Address was already on the blacklist.
    #[error("address {0} already added")]
    AddressAlreadyAdded(Address),

    /// Admin operation invoked by a non-owner.
    #[error("unauthorized account {0}")]
    OwnableUnauthorizedAccount(Address),

    /// Ownership transfer to an unusable address.
    #[error("invalid owner {0}")]
    OwnableInvalidOwner(Address),

    /// Numeric sale phase code does not name a phase.
    #[error("invalid sale phase code {0}")]
    InvalidSalePhase(u8),

    /// Token id was never minted.
    #[error("nonexistent token {0}")]
    NonexistentToken(TokenId),

    /// Ownership ledger collaborator failed.
    #[error("ownership ledger: {0}")]
    Ledger(#[from] LedgerError),

    /// Value transfer collaborator failed.
    #[error("treasury: {0}")]
    Treasury(#[from] TreasuryError),

    /// The ownership ledger rejected the commit and returning the deposit
    /// failed too. `paid` is still held by the treasury.
    #[error("ledger commit failed ({ledger}) and refund of {paid} wei to {caller} failed ({refund})")]
    RefundFailed {
        /// Payer whose deposit is stranded
        caller: Address,
        /// Stranded amount
        paid: U256,
        /// Why the commit failed
        ledger: LedgerError,
        /// Why the refund failed
        refund: TreasuryError,
    },
}

impl MintError {
    /// Short stable label, used for metrics and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountAtBlackList(_) => "account_at_black_list",
            Self::PreSaleIsNotOpen => "presale_not_open",
            Self::PublicSaleIsNotOpen => "public_sale_not_open",
            Self::InvalidProof(_) => "invalid_proof",
            Self::InsufficentPayment(..) => "insufficient_payment",
            Self::ExceedsMaxSupplyPresale(_) => "max_supply_presale",
            Self::ExceedsMaxQuantityPerAddressPresale(_) => "max_per_address_presale",
            Self::ExceedsMaxQuantityPerPresaleTransaction(_) => "max_per_tx_presale",
            Self::ExceedsMaxSupplyPublicSale(_) => "max_supply_public",
            Self::ExceedsMaxQuantityPerAddressPublic(_) => "max_per_address_public",
            Self::ExceedsMaxQuantityPerPublicTransaction(_) => "max_per_tx_public",
            Self::MintZeroQuantity => "zero_quantity",
            Self::AddressAlreadyAdded(_) => "address_already_added",
            Self::OwnableUnauthorizedAccount(_) => "unauthorized",
            Self::OwnableInvalidOwner(_) => "invalid_owner",
            Self::InvalidSalePhase(_) => "invalid_sale_phase",
            Self::NonexistentToken(_) => "nonexistent_token",
            Self::Ledger(_) => "ledger",
            Self::Treasury(_) => "treasury",
            Self::RefundFailed { .. } => "refund_failed",
        }
    }
}

/// Errors from the ownership ledger collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A token id in the requested range is already owned.
    #[error("token {0} already minted")]
    TokenAlreadyMinted(TokenId),

    /// Minting to the zero address.
    #[error("mint to the zero address")]
    MintToZeroAddress,

    /// Empty range requested.
    #[error("mint of zero tokens")]
    MintZeroQuantity,

    /// Requested range runs past the largest token id.
    #[error("token range starting at {start_id} with {count} ids overflows")]
    IdRangeOverflow {
        /// First requested id
        start_id: TokenId,
        /// Requested length
        count: u64,
    },

    /// Ledger backend is unavailable.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the value-transfer collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreasuryError {
    /// Balance arithmetic overflowed.
    #[error("treasury balance overflow")]
    Overflow,

    /// Refund larger than the retained balance.
    #[error("insufficient treasury funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount requested
        requested: U256,
        /// Amount held
        available: U256,
    },

    /// Forwarding funds failed.
    #[error("transfer failed: {0}")]
    TransferFailed(String),
}
