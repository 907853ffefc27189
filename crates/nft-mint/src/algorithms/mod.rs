//! # Algorithms Module
//!
//! Allowlist membership proofs.

pub mod merkle;

pub use merkle::{keccak256, leaf_hash, process_proof, verify, MerkleTree};
