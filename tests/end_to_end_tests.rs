// tests/end_to_end_tests.rs
//
// Full-pipeline integration tests: pre-pass small-factor stripping feeding
// the quadratic sieve, exercised through the crate's public API rather than
// any single module's internals.

use qsieve::bigint::BigInt;
use qsieve::config::SieveConfig;
use qsieve::prepass;
use qsieve::siqs;

#[test]
fn prepass_alone_fully_factors_a_smooth_number() {
    let n = BigInt::from(2 * 2 * 2 * 3 * 3 * 5 * 7 * 11 * 13i64);
    let number = prepass::strip_small_factors(&n, 1000, 10_000);
    assert!(number.is_fully_factored());

    let mut reconstructed = BigInt::one();
    for (p, &exp) in &number.factors {
        for _ in 0..exp {
            reconstructed = &reconstructed * p;
        }
    }
    assert_eq!(reconstructed, n);
}

#[test]
fn prepass_then_siqs_recovers_the_literal_scenario() {
    // N = 4175854084876627201, the spec's literal worked end-to-end example.
    let n = BigInt::from(4175854084876627201i64);

    let number = prepass::strip_small_factors(&n, 1000, 10_000);
    assert!(!number.is_fully_factored(), "this N has no small factors by construction");
    assert_eq!(number.cofactor, n);

    let mut config = SieveConfig::default();
    config.sieve_half_width = 2000;
    config.smoothness_multiplier = 0.65;
    config.relation_margin = 5;

    let (p, q) = siqs::factor(&number.cofactor, &config).expect("expected a non-trivial factor pair");
    assert_eq!(&p * &q, n);
    assert!(p > BigInt::one() && p < n);
    assert!(q > BigInt::one() && q < n);
}

#[test]
fn siqs_factor_on_a_small_semiprime_outside_its_sweet_spot_does_not_panic() {
    // SIQS is tuned for large N; a tiny composite should either factor
    // cleanly or exhaust re-initializations and return None, never panic.
    let n = BigInt::from(8051i64); // 83 * 97
    let mut config = SieveConfig::default();
    config.sieve_half_width = 200;
    config.max_reinitializations = 3;

    if let Some((p, q)) = siqs::factor(&n, &config) {
        assert_eq!(&p * &q, n);
    }
}
