use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use zkp_commitment_fixtures::{
    commit, encode_u32_limbs, FixtureAssembler, MerkleTree, SecretValue,
};

fn numbered_leaves(count: usize) -> Vec<[u8; 32]> {
    (0..count)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[0..8].copy_from_slice(&(i as u64).to_le_bytes());
            bytes
        })
        .collect()
}

fn bench_merkle_tree_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_root");

    for depth in [2u32, 3, 4, 6, 8, 10].iter() {
        let leaves = numbered_leaves(1 << depth);
        let tree = MerkleTree::with_leaves(*depth, leaves).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| black_box(tree.root()))
        });
    }

    group.finish();
}

fn bench_merkle_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_proof_generation");

    for depth in [2u32, 3, 4, 6, 8].iter() {
        let tree = MerkleTree::with_leaves(*depth, numbered_leaves(1 << depth)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| black_box(tree.generate_proof(black_box(0)).unwrap()))
        });
    }

    group.finish();
}

fn bench_fixture_assembly(c: &mut Criterion) {
    let nullifier = SecretValue::from(1234545679u64);
    let secret = SecretValue::from(987654321u64);
    let assembler = FixtureAssembler::default();

    c.bench_function("fixture_assembly", |b| {
        let mut rng = StdRng::seed_from_u64(0);
        b.iter(|| black_box(assembler.assemble(nullifier, secret, &mut rng).unwrap()))
    });
}

fn bench_commit_and_encode(c: &mut Criterion) {
    let nullifier = SecretValue::from(1234545679u64);
    let secret = SecretValue::from(987654321u64);

    c.bench_function("commit_and_encode", |b| {
        b.iter(|| black_box(encode_u32_limbs(&commit(black_box(&nullifier), black_box(&secret)))))
    });
}

criterion_group!(
    benches,
    bench_merkle_tree_construction,
    bench_merkle_proof_generation,
    bench_fixture_assembly,
    bench_commit_and_encode
);
criterion_main!(benches);
