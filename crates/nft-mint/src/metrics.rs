//! # Mint Metrics
//!
//! Prometheus metrics for mint throughput and guard rejections.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! nft-mint = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `mint_calls_total` - Counter of successful mint calls (by phase)
//! - `mint_tokens_total` - Counter of tokens minted (by phase)
//! - `mint_rejections_total` - Counter of rejected mint calls (by reason)
//! - `mint_admin_actions_total` - Counter of admin operations (by action)
//!
//! Without the feature every recording function is a no-op.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Successful mint calls, labeled by phase
    pub static ref MINT_CALLS: IntCounterVec = register_int_counter_vec!(
        "mint_calls_total",
        "Total number of successful mint calls",
        &["phase"]
    )
    .expect("Failed to create MINT_CALLS metric");

    /// Tokens minted, labeled by phase
    pub static ref TOKENS_MINTED: IntCounterVec = register_int_counter_vec!(
        "mint_tokens_total",
        "Total number of tokens minted",
        &["phase"]
    )
    .expect("Failed to create TOKENS_MINTED metric");

    /// Rejected mint calls, labeled by reason
    pub static ref MINT_REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "mint_rejections_total",
        "Total number of rejected mint calls",
        &["reason"]
    )
    .expect("Failed to create MINT_REJECTIONS metric");

    /// Admin operations, labeled by action
    pub static ref ADMIN_ACTIONS: IntCounterVec = register_int_counter_vec!(
        "mint_admin_actions_total",
        "Total number of successful admin operations",
        &["action"]
    )
    .expect("Failed to create ADMIN_ACTIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a successful mint
#[cfg(feature = "metrics")]
pub fn record_mint(phase: &str, quantity: u64) {
    MINT_CALLS.with_label_values(&[phase]).inc();
    TOKENS_MINTED.with_label_values(&[phase]).inc_by(quantity);
}

/// Record a rejected mint
#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    MINT_REJECTIONS.with_label_values(&[reason]).inc();
}

/// Record an admin action
#[cfg(feature = "metrics")]
pub fn record_admin_action(action: &str) {
    ADMIN_ACTIONS.with_label_values(&[action]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature is disabled)
// =============================================================================

/// Record a successful mint (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_mint(_phase: &str, _quantity: u64) {}

/// Record a rejected mint (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}

/// Record an admin action (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_admin_action(_action: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_does_not_panic() {
        record_mint("presale", 3);
        record_rejection("invalid_proof");
        record_admin_action("set_sale");
    }
}
