//! # Quantum-Mint Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Allowlist | proof verification, 10k members | < 50us |
//! | Allowlist | tree build, 10k members | < 50ms |
//! | Engine | public mint, in-memory adapters | < 50us |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mint_tests::fixtures::{deploy, random_addresses, OWNER};
use nft_mint::prelude::*;
use std::time::Duration;

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowlist-verify");
    group.measurement_time(Duration::from_secs(5));

    for size in [16usize, 1_024, 10_000] {
        let members = random_addresses(size);
        let tree = MerkleTree::from_addresses(&members);
        let root = tree.root();
        let member = members[size / 2];
        let proof = tree.proof(&member).unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| black_box(verify(&root, &member, &proof)))
        });
    }

    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowlist-build");
    group.sample_size(20);

    for size in [256usize, 10_000] {
        let members = random_addresses(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("from_addresses", size), &members, |b, m| {
            b.iter(|| black_box(MerkleTree::from_addresses(m).root()))
        });
    }

    group.finish();
}

fn bench_public_mint(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("engine-mint");

    let mut config = MintConfig::for_testing();
    config.public_sale = PhaseLimits::new(u64::MAX, u64::MAX, 1);
    let engine = deploy(config);
    runtime
        .block_on(engine.set_sale(OWNER, SalePhase::PublicSale))
        .unwrap();
    let minter = random_addresses(1)[0];

    group.bench_function("mint_public_single", |b| {
        b.iter(|| {
            runtime
                .block_on(engine.mint_public(minter, 1, U256::one()))
                .is_ok()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_proof_verification,
    bench_tree_build,
    bench_public_mint
);
criterion_main!(benches);
