//! Cross-crate integration tests.

pub mod concurrency;
pub mod flows;
