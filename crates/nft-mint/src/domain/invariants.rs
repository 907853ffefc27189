//! # Domain Invariants
//!
//! Business rules that must hold at every observable point.

use super::supply::{PhaseLimits, SupplySnapshot};

/// Invariant: total minted equals the sum of both phases.
#[must_use]
pub fn invariant_supply_consistent(snapshot: &SupplySnapshot) -> bool {
    snapshot.presale_minted.checked_add(snapshot.public_minted) == Some(snapshot.total_minted)
}

/// Invariant: phase counters never exceed their supply caps.
#[must_use]
pub fn invariant_within_caps(
    snapshot: &SupplySnapshot,
    presale: &PhaseLimits,
    public: &PhaseLimits,
) -> bool {
    snapshot.presale_minted <= presale.supply && snapshot.public_minted <= public.supply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_consistent() {
        let snap = SupplySnapshot {
            total_minted: 7,
            presale_minted: 3,
            public_minted: 4,
        };
        assert!(invariant_supply_consistent(&snap));
    }

    #[test]
    fn test_supply_inconsistent() {
        let snap = SupplySnapshot {
            total_minted: 8,
            presale_minted: 3,
            public_minted: 4,
        };
        assert!(!invariant_supply_consistent(&snap));
    }

    #[test]
    fn test_within_caps_boundary() {
        let limits = PhaseLimits::new(4, 4, 4);
        let at_cap = SupplySnapshot {
            total_minted: 8,
            presale_minted: 4,
            public_minted: 4,
        };
        assert!(invariant_within_caps(&at_cap, &limits, &limits));

        let over = SupplySnapshot {
            total_minted: 9,
            presale_minted: 5,
            public_minted: 4,
        };
        assert!(!invariant_within_caps(&over, &limits, &limits));
    }
}
