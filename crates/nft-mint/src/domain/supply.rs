//! # Supply Ledger
//!
//! Minted counters, cap enforcement and sequential token id assignment.
//!
//! ## Invariants
//!
//! - `total_minted == presale_minted + public_minted`
//! - `presale_minted <= presale.supply`, `public_minted <= public.supply`
//! - every per-address counter stays within its phase's per-address cap
//!
//! All checks run before any counter is written, so a rejected reservation
//! leaves the ledger untouched.

use super::errors::MintError;
use super::value_objects::{Address, SalePhase, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// First token id handed out.
pub const FIRST_TOKEN_ID: TokenId = 1;

/// Quantity ceilings for one sale phase. A value equal to the cap is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseLimits {
    /// Maximum tokens minted in this phase across all addresses.
    pub supply: u64,
    /// Maximum tokens one address may mint in this phase.
    pub per_address: u64,
    /// Maximum tokens per mint call.
    pub per_transaction: u64,
}

impl PhaseLimits {
    /// Create limits.
    #[must_use]
    pub const fn new(supply: u64, per_address: u64, per_transaction: u64) -> Self {
        Self {
            supply,
            per_address,
            per_transaction,
        }
    }
}

/// A successful reservation of consecutive token ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// Phase the tokens were reserved in.
    pub phase: SalePhase,
    /// Address the tokens are reserved for.
    pub minter: Address,
    /// First reserved id.
    pub first_token_id: TokenId,
    /// Number of consecutive ids.
    pub quantity: u64,
}

impl Reservation {
    /// Last reserved id (inclusive).
    #[must_use]
    pub fn last_token_id(&self) -> TokenId {
        self.first_token_id + self.quantity - 1
    }
}

/// Point-in-time copy of the counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySnapshot {
    /// Tokens minted in total.
    pub total_minted: u64,
    /// Tokens minted during presale.
    pub presale_minted: u64,
    /// Tokens minted during public sale.
    pub public_minted: u64,
}

/// Counters and caps for both sale phases.
#[derive(Clone, Debug)]
pub struct SupplyLedger {
    presale: PhaseLimits,
    public: PhaseLimits,
    total_minted: u64,
    presale_minted: u64,
    public_minted: u64,
    per_address_presale: HashMap<Address, u64>,
    per_address_public: HashMap<Address, u64>,
}

/// Cap-specific error constructors for one phase.
struct PhaseErrors {
    supply: fn(u64) -> MintError,
    per_address: fn(Address) -> MintError,
    per_transaction: fn(Address) -> MintError,
}

const PRESALE_ERRORS: PhaseErrors = PhaseErrors {
    supply: MintError::ExceedsMaxSupplyPresale,
    per_address: MintError::ExceedsMaxQuantityPerAddressPresale,
    per_transaction: MintError::ExceedsMaxQuantityPerPresaleTransaction,
};

const PUBLIC_ERRORS: PhaseErrors = PhaseErrors {
    supply: MintError::ExceedsMaxSupplyPublicSale,
    per_address: MintError::ExceedsMaxQuantityPerAddressPublic,
    per_transaction: MintError::ExceedsMaxQuantityPerPublicTransaction,
};

/// Check one phase's caps in order: supply, per-address, per-transaction.
///
/// The supply check also covers the id space: the exclusive end of the
/// reserved range, `total_minted + quantity + FIRST_TOKEN_ID`, must fit in
/// a `TokenId` even when the caps of both phases sum past it.
fn check_limits(
    limits: &PhaseLimits,
    errors: &PhaseErrors,
    total_minted: u64,
    phase_minted: u64,
    address_minted: u64,
    minter: Address,
    quantity: u64,
) -> Result<(), MintError> {
    if quantity == 0 {
        return Err(MintError::MintZeroQuantity);
    }

    match phase_minted.checked_add(quantity) {
        Some(total) if total <= limits.supply => {}
        _ => return Err((errors.supply)(limits.supply)),
    }

    if total_minted
        .checked_add(quantity)
        .and_then(|total| total.checked_add(FIRST_TOKEN_ID))
        .is_none()
    {
        return Err((errors.supply)(limits.supply));
    }

    match address_minted.checked_add(quantity) {
        Some(total) if total <= limits.per_address => {}
        _ => return Err((errors.per_address)(minter)),
    }

    if quantity > limits.per_transaction {
        return Err((errors.per_transaction)(minter));
    }

    Ok(())
}

impl SupplyLedger {
    /// Create an empty ledger with the given caps.
    #[must_use]
    pub fn new(presale: PhaseLimits, public: PhaseLimits) -> Self {
        Self {
            presale,
            public,
            total_minted: 0,
            presale_minted: 0,
            public_minted: 0,
            per_address_presale: HashMap::new(),
            per_address_public: HashMap::new(),
        }
    }

    /// Reserve `quantity` presale tokens for `minter`.
    ///
    /// Returns the reservation (first id plus range) on success.
    pub fn reserve_presale(
        &mut self,
        minter: Address,
        quantity: u64,
    ) -> Result<Reservation, MintError> {
        check_limits(
            &self.presale,
            &PRESALE_ERRORS,
            self.total_minted,
            self.presale_minted,
            self.minted_presale_by(&minter),
            minter,
            quantity,
        )?;

        self.presale_minted += quantity;
        *self.per_address_presale.entry(minter).or_insert(0) += quantity;
        Ok(self.assign_ids(SalePhase::Presale, minter, quantity))
    }

    /// Reserve `quantity` public-sale tokens for `minter`.
    pub fn reserve_public(
        &mut self,
        minter: Address,
        quantity: u64,
    ) -> Result<Reservation, MintError> {
        check_limits(
            &self.public,
            &PUBLIC_ERRORS,
            self.total_minted,
            self.public_minted,
            self.minted_public_by(&minter),
            minter,
            quantity,
        )?;

        self.public_minted += quantity;
        *self.per_address_public.entry(minter).or_insert(0) += quantity;
        Ok(self.assign_ids(SalePhase::PublicSale, minter, quantity))
    }

    fn assign_ids(&mut self, phase: SalePhase, minter: Address, quantity: u64) -> Reservation {
        let first_token_id = self.total_minted + FIRST_TOKEN_ID;
        self.total_minted += quantity;
        debug!(
            %phase,
            minter = %minter,
            first_token_id,
            quantity,
            "Reserved token ids"
        );
        Reservation {
            phase,
            minter,
            first_token_id,
            quantity,
        }
    }

    /// Undo the most recent reservation after its commit failed downstream.
    ///
    /// Must be called before any other reservation is made.
    pub fn release(&mut self, reservation: &Reservation) {
        let quantity = reservation.quantity;
        let (phase_minted, per_address) = match reservation.phase {
            SalePhase::Presale => (&mut self.presale_minted, &mut self.per_address_presale),
            SalePhase::PublicSale => (&mut self.public_minted, &mut self.per_address_public),
            SalePhase::Closed => return,
        };

        *phase_minted -= quantity;
        if let Some(count) = per_address.get_mut(&reservation.minter) {
            *count -= quantity;
            if *count == 0 {
                per_address.remove(&reservation.minter);
            }
        }
        self.total_minted -= quantity;
        debug!(
            first_token_id = reservation.first_token_id,
            quantity, "Released reservation"
        );
    }

    /// Tokens minted in total.
    #[must_use]
    pub fn total_minted(&self) -> u64 {
        self.total_minted
    }

    /// Tokens minted during presale.
    #[must_use]
    pub fn presale_minted(&self) -> u64 {
        self.presale_minted
    }

    /// Tokens minted during public sale.
    #[must_use]
    pub fn public_minted(&self) -> u64 {
        self.public_minted
    }

    /// Presale tokens minted by `address`.
    #[must_use]
    pub fn minted_presale_by(&self, address: &Address) -> u64 {
        self.per_address_presale.get(address).copied().unwrap_or(0)
    }

    /// Public tokens minted by `address`.
    #[must_use]
    pub fn minted_public_by(&self, address: &Address) -> u64 {
        self.per_address_public.get(address).copied().unwrap_or(0)
    }

    /// Presale caps.
    #[must_use]
    pub fn presale_limits(&self) -> PhaseLimits {
        self.presale
    }

    /// Public sale caps.
    #[must_use]
    pub fn public_limits(&self) -> PhaseLimits {
        self.public
    }

    /// Counter snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SupplySnapshot {
        SupplySnapshot {
            total_minted: self.total_minted,
            presale_minted: self.presale_minted,
            public_minted: self.public_minted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invariants::invariant_supply_consistent;
    use proptest::prelude::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn ledger() -> SupplyLedger {
        SupplyLedger::new(PhaseLimits::new(6, 5, 4), PhaseLimits::new(10, 6, 5))
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut ledger = ledger();
        let first = ledger.reserve_presale(addr(1), 3).unwrap();
        assert_eq!(first.first_token_id, 1);
        assert_eq!(first.last_token_id(), 3);

        let second = ledger.reserve_public(addr(2), 2).unwrap();
        assert_eq!(second.first_token_id, 4);
        assert_eq!(ledger.total_minted(), 5);
    }

    #[test]
    fn test_presale_supply_exact_boundary() {
        let mut ledger = ledger();
        ledger.reserve_presale(addr(1), 4).unwrap();
        // 4 + 2 == 6 reaches the cap exactly
        assert!(ledger.reserve_presale(addr(2), 2).is_ok());
        assert_eq!(
            ledger.reserve_presale(addr(3), 1),
            Err(MintError::ExceedsMaxSupplyPresale(6))
        );
    }

    #[test]
    fn test_presale_supply_checked_before_per_address() {
        let mut ledger = ledger();
        ledger.reserve_presale(addr(1), 4).unwrap();
        assert_eq!(
            ledger.reserve_presale(addr(2), 3),
            Err(MintError::ExceedsMaxSupplyPresale(6))
        );
    }

    #[test]
    fn test_presale_per_address() {
        let mut ledger = ledger();
        ledger.reserve_presale(addr(1), 3).unwrap();
        assert_eq!(
            ledger.reserve_presale(addr(1), 3),
            Err(MintError::ExceedsMaxQuantityPerAddressPresale(addr(1)))
        );
        // Reaching the per-address cap exactly is fine
        assert!(ledger.reserve_presale(addr(1), 2).is_ok());
        assert_eq!(ledger.minted_presale_by(&addr(1)), 5);
    }

    #[test]
    fn test_presale_per_transaction() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.reserve_presale(addr(1), 5),
            Err(MintError::ExceedsMaxQuantityPerPresaleTransaction(addr(1)))
        );
        assert_eq!(ledger.total_minted(), 0);
    }

    #[test]
    fn test_public_caps() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.reserve_public(addr(1), 7),
            Err(MintError::ExceedsMaxQuantityPerAddressPublic(addr(1)))
        );
        assert_eq!(
            ledger.reserve_public(addr(1), 6),
            Err(MintError::ExceedsMaxQuantityPerPublicTransaction(addr(1)))
        );
        ledger.reserve_public(addr(1), 4).unwrap();
        ledger.reserve_public(addr(2), 4).unwrap();
        assert_eq!(
            ledger.reserve_public(addr(2), 3),
            Err(MintError::ExceedsMaxSupplyPublicSale(10))
        );
    }

    #[test]
    fn test_phases_are_independent() {
        let mut ledger = ledger();
        ledger.reserve_presale(addr(1), 4).unwrap();
        ledger.reserve_public(addr(1), 5).unwrap();
        assert_eq!(ledger.minted_presale_by(&addr(1)), 4);
        assert_eq!(ledger.minted_public_by(&addr(1)), 5);
        assert!(invariant_supply_consistent(&ledger.snapshot()));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.reserve_public(addr(1), 0),
            Err(MintError::MintZeroQuantity)
        );
    }

    #[test]
    fn test_overflowing_quantity_is_a_supply_error() {
        let mut ledger = ledger();
        ledger.reserve_public(addr(1), 1).unwrap();
        assert_eq!(
            ledger.reserve_public(addr(1), u64::MAX),
            Err(MintError::ExceedsMaxSupplyPublicSale(10))
        );
    }

    #[test]
    fn test_id_space_exhaustion_is_a_supply_error() {
        let unbounded = PhaseLimits::new(u64::MAX, u64::MAX, u64::MAX);
        let mut ledger = SupplyLedger::new(unbounded, unbounded);

        ledger.reserve_presale(addr(1), u64::MAX - 2).unwrap();
        let before = ledger.snapshot();
        assert_eq!(
            ledger.reserve_public(addr(2), 5),
            Err(MintError::ExceedsMaxSupplyPublicSale(u64::MAX))
        );
        assert_eq!(ledger.snapshot(), before);

        // The last id that still fits is handed out
        let last = ledger.reserve_public(addr(2), 1).unwrap();
        assert_eq!(last.last_token_id(), u64::MAX - 1);
        assert_eq!(
            ledger.reserve_public(addr(2), 1),
            Err(MintError::ExceedsMaxSupplyPublicSale(u64::MAX))
        );
        assert!(invariant_supply_consistent(&ledger.snapshot()));
    }

    #[test]
    fn test_release_restores_counters() {
        let mut ledger = ledger();
        ledger.reserve_presale(addr(1), 2).unwrap();
        let before = ledger.snapshot();

        let reservation = ledger.reserve_presale(addr(2), 3).unwrap();
        ledger.release(&reservation);

        assert_eq!(ledger.snapshot(), before);
        assert_eq!(ledger.minted_presale_by(&addr(2)), 0);
        // Ids are handed out again after a release
        let again = ledger.reserve_presale(addr(2), 3).unwrap();
        assert_eq!(again.first_token_id, reservation.first_token_id);
    }

    proptest! {
        #[test]
        fn prop_boundary_is_exact(prior in 0u64..=4, quantity in 1u64..=4) {
            // presale cap 6, per-address 5, per-tx 4; prior mints by another address
            let mut ledger = ledger();
            if prior > 0 {
                ledger.reserve_presale(addr(9), prior).unwrap();
            }
            let result = ledger.reserve_presale(addr(1), quantity);
            if prior + quantity <= 6 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(MintError::ExceedsMaxSupplyPresale(6)));
            }
        }

        #[test]
        fn prop_counters_stay_consistent(
            ops in proptest::collection::vec((any::<bool>(), 0u8..4, 0u64..8), 0..60)
        ) {
            let mut ledger = ledger();
            for (presale, who, quantity) in ops {
                let before = ledger.snapshot();
                let result = if presale {
                    ledger.reserve_presale(addr(who), quantity)
                } else {
                    ledger.reserve_public(addr(who), quantity)
                };
                if result.is_err() {
                    prop_assert_eq!(ledger.snapshot(), before);
                }
                let snap = ledger.snapshot();
                prop_assert!(invariant_supply_consistent(&snap));
                prop_assert!(snap.presale_minted <= 6);
                prop_assert!(snap.public_minted <= 10);
                prop_assert!(ledger.minted_presale_by(&addr(who)) <= 5);
                prop_assert!(ledger.minted_public_by(&addr(who)) <= 6);
            }
        }
    }
}
