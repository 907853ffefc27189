//! Mint-Admin: operator tooling for the mint engine.
//!
//! Builds allowlist Merkle roots and proofs off-line, validates engine
//! configuration files and dry-runs a presale against in-memory adapters.

use anyhow::{bail, Context, Result};
use nft_mint::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Root and per-member proofs for an allowlist.
#[derive(Debug, Clone, Serialize)]
pub struct AllowlistReport {
    /// Root to commit with `set_merkle_root`.
    pub root: Hash,
    /// Number of members.
    pub count: usize,
    /// Proof for every member, in file order.
    pub proofs: Vec<MemberProof>,
}

/// One member's proof.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProof {
    /// Allowlisted address.
    pub address: Address,
    /// Sibling hashes, leaf to root.
    pub proof: Vec<Hash>,
}

/// Outcome of one simulated mint.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedMint {
    /// Minter.
    pub address: Address,
    /// First token id on success.
    pub first_token_id: Option<TokenId>,
    /// Failure kind on rejection.
    pub rejected: Option<String>,
}

/// Result of a dry-run presale.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Per-member outcomes.
    pub mints: Vec<SimulatedMint>,
    /// Counters after the run.
    pub supply: SupplySnapshot,
    /// Proceeds retained.
    pub proceeds: U256,
}

/// Parse an allowlist: one hex address per line, `#` comments and blank
/// lines ignored. Duplicates are dropped with a warning.
pub fn parse_allowlist(content: &str) -> Result<Vec<Address>> {
    let mut seen = HashSet::new();
    let mut addresses = Vec::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let address: Address = line
            .parse()
            .with_context(|| format!("line {}: invalid address {:?}", number + 1, line))?;
        if seen.insert(address) {
            addresses.push(address);
        } else {
            warn!(%address, line = number + 1, "Duplicate allowlist entry skipped");
        }
    }

    Ok(addresses)
}

/// Read and parse an allowlist file.
pub fn load_allowlist(path: &Path) -> Result<Vec<Address>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read allowlist {}", path.display()))?;
    let addresses = parse_allowlist(&content)?;
    debug!(path = %path.display(), members = addresses.len(), "Allowlist loaded");
    Ok(addresses)
}

/// Build the tree and every member's proof.
pub fn build_report(addresses: &[Address]) -> Result<AllowlistReport> {
    if addresses.is_empty() {
        bail!("allowlist is empty");
    }

    let tree = MerkleTree::from_addresses(addresses);
    let proofs = addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            tree.proof_at(index)
                .map(|proof| MemberProof {
                    address: *address,
                    proof,
                })
                .with_context(|| format!("no proof for leaf {index}"))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(root = %tree.root(), members = addresses.len(), "Allowlist tree built");
    Ok(AllowlistReport {
        root: tree.root(),
        count: addresses.len(),
        proofs,
    })
}

/// Proof for one member.
pub fn proof_for(addresses: &[Address], address: &Address) -> Result<Vec<Hash>> {
    MerkleTree::from_addresses(addresses)
        .proof(address)
        .with_context(|| format!("{} is not on the allowlist", address.to_hex()))
}

/// Parse hex proof elements and check them against `root`.
pub fn check_proof(root: &Hash, address: &Address, proof: &[String]) -> Result<bool> {
    let proof = proof
        .iter()
        .map(|element| {
            element
                .parse::<Hash>()
                .with_context(|| format!("invalid proof element {element:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(verify(root, address, &proof))
}

/// Load a config file, or defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<MintConfig> {
    match path {
        Some(path) => MintConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display())),
        None => Ok(MintConfig::default()),
    }
}

/// Sanity checks beyond parsing. Returns human-readable findings.
pub fn lint_config(config: &MintConfig) -> Vec<String> {
    let mut findings = Vec::new();
    for (phase, limits) in [("presale", config.presale), ("public_sale", config.public_sale)] {
        if limits.supply == 0 {
            findings.push(format!("{phase}: supply is zero, every mint will fail"));
        }
        if limits.per_transaction > limits.per_address {
            findings.push(format!(
                "{phase}: per_transaction ({}) exceeds per_address ({})",
                limits.per_transaction, limits.per_address
            ));
        }
        if limits.per_address > limits.supply {
            findings.push(format!(
                "{phase}: per_address ({}) exceeds supply ({})",
                limits.per_address, limits.supply
            ));
        }
    }
    if config.merkle_root.is_zero() {
        findings.push("merkle_root is zero, presale is unusable until set".to_string());
    }
    if config.price_per_unit.is_zero() {
        findings.push("price_per_unit is zero".to_string());
    }
    findings
}

/// Default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&MintConfig::default()).context("failed to render default config")
}

/// Open a presale over in-memory adapters and have every member mint
/// `quantity` tokens at the configured price.
pub async fn simulate_presale(
    config: MintConfig,
    addresses: &[Address],
    quantity: u64,
) -> Result<SimulationReport> {
    let operator = Address::new([0xFF; 20]);
    let tree = MerkleTree::from_addresses(addresses);
    let price = config
        .price_for(quantity)
        .context("price overflows for requested quantity")?;

    let engine = MintService::new(
        operator,
        config.with_merkle_root(tree.root()),
        Arc::new(InMemoryOwnershipLedger::new()),
        Arc::new(InMemoryTreasury::new()),
        Arc::new(InMemoryEventLog::new()),
    );
    engine.set_sale(operator, SalePhase::Presale).await?;

    let mut mints = Vec::with_capacity(addresses.len());
    for (index, address) in addresses.iter().enumerate() {
        let proof = tree.proof_at(index).unwrap_or_default();
        let outcome = engine.mint_presale(*address, quantity, &proof, price).await;
        mints.push(match outcome {
            Ok(receipt) => SimulatedMint {
                address: *address,
                first_token_id: Some(receipt.first_token_id),
                rejected: None,
            },
            Err(err) => SimulatedMint {
                address: *address,
                first_token_id: None,
                rejected: Some(err.kind().to_string()),
            },
        });
    }

    Ok(SimulationReport {
        mints,
        supply: engine.supply_snapshot().await,
        proceeds: engine.treasury_balance().await,
    })
}
