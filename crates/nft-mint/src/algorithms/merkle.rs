//! # Allowlist Merkle Proofs
//!
//! Sorted-pair Keccak-256 membership proofs.
//!
//! Only the root is committed to the engine. Trees are built off-system (the
//! `mint-admin` tool, tests) and must use the same convention:
//!
//! - leaf = keccak256(address bytes)
//! - parent = keccak256(min(a, b) || max(a, b))
//! - an unpaired node at the end of a level is promoted unchanged

use crate::domain::{Address, Hash};
use sha3::{Digest, Keccak256};

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash::new(hasher.finalize().into())
}

/// Allowlist leaf for an address.
#[must_use]
pub fn leaf_hash(address: &Address) -> Hash {
    keccak256(address.as_bytes())
}

/// Hash two nodes in canonical (sorted) order.
fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Hash::new(hasher.finalize().into())
}

/// Fold a proof into a leaf, yielding the implied root.
#[must_use]
pub fn process_proof(leaf: Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(leaf, |node, sibling| hash_sorted_pair(&node, sibling))
}

/// Verify that `address` belongs to the set committed by `root`.
///
/// # Algorithm
///
/// 1. leaf = keccak256(address)
/// 2. For each sibling: node = keccak256(sorted(node, sibling))
/// 3. Result must equal `root`
///
/// Sibling position is irrelevant because pairs are sorted before hashing.
///
/// # Time Complexity: O(proof length)
#[must_use]
pub fn verify(root: &Hash, address: &Address, proof: &[Hash]) -> bool {
    process_proof(leaf_hash(address), proof) == *root
}

/// Allowlist tree built from an ordered address list.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// levels[0] are the leaves, the last level holds the root.
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree from addresses, keeping their order.
    #[must_use]
    pub fn from_addresses(addresses: &[Address]) -> Self {
        let leaves = addresses.iter().map(leaf_hash).collect();
        Self::from_leaves(leaves)
    }

    /// Build a tree from precomputed leaves.
    #[must_use]
    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        let mut levels = vec![leaves];

        while levels.last().map_or(0, Vec::len) > 1 {
            let level = &levels[levels.len() - 1];
            let next: Vec<Hash> = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_sorted_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            levels.push(next);
        }

        Self { levels }
    }

    /// Committed root. The zero hash for an empty tree.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// True if the tree has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Proof for the leaf at `index`.
    #[must_use]
    pub fn proof_at(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.len() {
            return None;
        }

        let mut proof = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = idx ^ 1;
            if let Some(hash) = level.get(sibling) {
                proof.push(*hash);
            }
            idx /= 2;
        }
        Some(proof)
    }

    /// Proof for an address; `None` if it is not a member.
    #[must_use]
    pub fn proof(&self, address: &Address) -> Option<Vec<Hash>> {
        let leaf = leaf_hash(address);
        let index = self.levels.first()?.iter().position(|h| *h == leaf)?;
        self.proof_at(index)
    }
}
