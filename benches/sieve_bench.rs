// benches/sieve_bench.rs
//
// Benchmarks the factor-base build and the log-sieve/trial-division pass
// for one polynomial, the two hottest loops in the pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qsieve::bigint::BigInt;
use qsieve::factor_base::FactorBase;
use qsieve::siqs::polynomial::PolynomialFamily;
use qsieve::siqs::sieve::sieve_polynomial;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_factor_base_build(c: &mut Criterion) {
    let n = BigInt::from(4175854084876627201i64);
    c.bench_function("factor_base_build_200", |b| {
        b.iter(|| black_box(FactorBase::build(&n, 200)))
    });
}

fn bench_sieve_single_polynomial(c: &mut Criterion) {
    let n = BigInt::from(4175854084876627201i64);
    let fb = FactorBase::build(&n, 120);

    c.bench_function("sieve_single_polynomial", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let mut family = PolynomialFamily::initialize(&n, &fb, &mut rng, 15_000);
            family.advance();
            if let Some(poly) = family.current() {
                black_box(sieve_polynomial(&n, &fb, &poly, family.roots(), 15_000, 0.65));
            }
        })
    });
}

criterion_group!(benches, bench_factor_base_build, bench_sieve_single_polynomial);
criterion_main!(benches);
