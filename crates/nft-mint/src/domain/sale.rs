//! # Sale Phase Controller
//!
//! Current sale phase, committed allowlist root and the reveal flag.
//!
//! Phase changes are unconditional: any phase may follow any other,
//! including going backwards. Reveal is one-directional.

use super::value_objects::{Hash, SalePhase};

/// Phase, allowlist root and reveal state.
#[derive(Clone, Debug, Default)]
pub struct SalePhaseController {
    phase: SalePhase,
    allowlist_root: Hash,
    revealed: bool,
}

impl SalePhaseController {
    /// Start closed and unrevealed with the given allowlist root.
    #[must_use]
    pub fn new(allowlist_root: Hash) -> Self {
        Self {
            phase: SalePhase::Closed,
            allowlist_root,
            revealed: false,
        }
    }

    /// Overwrite the phase. Returns the previous one.
    pub fn set_phase(&mut self, phase: SalePhase) -> SalePhase {
        std::mem::replace(&mut self.phase, phase)
    }

    /// Overwrite the allowlist root. Returns the previous one.
    pub fn set_allowlist_root(&mut self, root: Hash) -> Hash {
        std::mem::replace(&mut self.allowlist_root, root)
    }

    /// Set the reveal flag. Returns true if this call changed it.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    /// Active phase.
    #[must_use]
    pub fn current_phase(&self) -> SalePhase {
        self.phase
    }

    /// Committed allowlist root.
    #[must_use]
    pub fn allowlist_root(&self) -> Hash {
        self.allowlist_root
    }

    /// Whether per-token metadata is exposed.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}
