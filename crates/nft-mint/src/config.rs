//! # Mint Configuration
//!
//! Collection identity, price, caps, allowlist root and metadata locations.
//!
//! Caps are configuration, not architecture: nothing ties the presale and
//! public supplies to a total collection size.
//!
//! # Config File Format
//!
//! ```toml
//! name = "Nft"
//! symbol = "N"
//! # wei, hex encoded (0.01 ether)
//! price_per_unit = "0x2386f26fc10000"
//! merkle_root = "0x0000000000000000000000000000000000000000000000000000000000000000"
//!
//! [presale]
//! supply = 6
//! per_address = 5
//! per_transaction = 4
//!
//! [public_sale]
//! supply = 10
//! per_address = 6
//! per_transaction = 5
//!
//! [metadata]
//! placeholder_uri = "ipfs://..."
//! base_uri = "ipfs://.../"
//! uri_suffix = ".json"
//! ```

use crate::domain::{units, Hash, MetadataResolver, PhaseLimits, U256};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default price per token: 0.01 ether.
pub const DEFAULT_PRICE_MILLI_ETHER: u64 = 10;

/// Default presale caps (supply, per address, per transaction).
pub const DEFAULT_PRESALE_LIMITS: PhaseLimits = PhaseLimits::new(6, 5, 4);

/// Default public sale caps (supply, per address, per transaction).
pub const DEFAULT_PUBLIC_LIMITS: PhaseLimits = PhaseLimits::new(10, 6, 5);

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parse error.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Mint engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// Price of one token in wei.
    pub price_per_unit: U256,
    /// Allowlist root committed at initialization.
    pub merkle_root: Hash,
    /// Presale caps.
    pub presale: PhaseLimits,
    /// Public sale caps.
    pub public_sale: PhaseLimits,
    /// Metadata locations.
    pub metadata: MetadataResolver,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            name: "Nft".to_string(),
            symbol: "N".to_string(),
            price_per_unit: units::milli_ether(DEFAULT_PRICE_MILLI_ETHER),
            merkle_root: Hash::ZERO,
            presale: DEFAULT_PRESALE_LIMITS,
            public_sale: DEFAULT_PUBLIC_LIMITS,
            metadata: MetadataResolver::default(),
        }
    }
}

impl MintConfig {
    /// Small caps and a 1 wei price, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            price_per_unit: U256::one(),
            presale: PhaseLimits::new(4, 4, 4),
            public_sale: PhaseLimits::new(4, 4, 4),
            ..Self::default()
        }
    }

    /// Builder-style root override.
    #[must_use]
    pub fn with_merkle_root(mut self, root: Hash) -> Self {
        self.merkle_root = root;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Total price for `quantity` tokens; `None` on overflow.
    #[must_use]
    pub fn price_for(&self, quantity: u64) -> Option<U256> {
        self.price_per_unit.checked_mul(U256::from(quantity))
    }
}
