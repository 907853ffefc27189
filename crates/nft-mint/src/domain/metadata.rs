//! # Metadata Resolver
//!
//! Token URI selection, gated solely by the reveal flag.

use super::value_objects::TokenId;
use serde::{Deserialize, Serialize};

/// Shared placeholder shown for every token before reveal.
pub const DEFAULT_PLACEHOLDER_URI: &str =
    "ipfs://bafkreihnzikl37jgzddm5q32crap32433xzarxjynhzr2avd3so7nnw2oa";

/// Base location of per-token metadata after reveal.
pub const DEFAULT_BASE_URI: &str =
    "ipfs://bafybeihmfwdkcj7rqakydgtetiop3fh7hyoo5ilgifyeb7b5ftt5ah6oea/";

/// Suffix appended after the token id.
pub const DEFAULT_URI_SUFFIX: &str = ".json";

/// Metadata locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataResolver {
    /// Pre-reveal location, identical for all tokens.
    pub placeholder_uri: String,
    /// Post-reveal prefix.
    pub base_uri: String,
    /// Post-reveal suffix.
    pub uri_suffix: String,
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self {
            placeholder_uri: DEFAULT_PLACEHOLDER_URI.to_string(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            uri_suffix: DEFAULT_URI_SUFFIX.to_string(),
        }
    }
}

impl MetadataResolver {
    /// Location for `token_id`. Existence is checked by the caller.
    #[must_use]
    pub fn resolve(&self, token_id: TokenId, revealed: bool) -> String {
        if revealed {
            format!("{}{}{}", self.base_uri, token_id, self.uri_suffix)
        } else {
            self.placeholder_uri.clone()
        }
    }
}
