// src/siqs/mod.rs
//
// Self-Initializing Multiple-Polynomial Quadratic Sieve orchestration: ties
// the factor base, polynomial family, sieve, and GF(2) linear algebra into a
// single `factor` entry point, re-initializing with a fresh base-prime
// subset whenever a dependency yields only trivial factors.

pub mod polynomial;
pub mod sieve;

use crate::bigint::BigInt;
use crate::combiner::extract_factor;
use crate::config::SieveConfig;
use crate::factor_base::FactorBase;
use crate::linalg::{parity_vector, GF2Basis};
use crate::siqs::polynomial::PolynomialFamily;
use crate::siqs::sieve::{sieve_polynomial, Relation};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Runs the sieve to completion against a composite `n`, returning a
/// non-trivial factor pair `(p, q)` with `p * q == n`, or `None` if the
/// configured re-initialization budget is exhausted first.
///
/// `n` is assumed already free of small factors (run [`crate::prepass::run`]
/// first) and not a perfect power or prime.
pub fn factor(n: &BigInt, config: &SieveConfig) -> Option<(BigInt, BigInt)> {
    let digits = n.to_string().trim_start_matches('-').len();
    let factor_base_size = config.factor_base_size_for_digits(digits);
    let factor_base = FactorBase::build(n, factor_base_size);

    let mut rng = ChaCha8Rng::seed_from_u64(0x5317_4553_u64 ^ digits as u64);

    for attempt in 0..=config.max_reinitializations {
        debug!("siqs: re-initialization attempt {attempt}");
        if let Some(result) = sieve_and_solve(n, &factor_base, config, &mut rng) {
            return Some(result);
        }
    }

    info!("siqs: exhausted {} re-initializations without a factor", config.max_reinitializations);
    None
}

fn sieve_and_solve(
    n: &BigInt,
    factor_base: &FactorBase,
    config: &SieveConfig,
    rng: &mut ChaCha8Rng,
) -> Option<(BigInt, BigInt)> {
    let mut family = PolynomialFamily::initialize(n, factor_base, rng, config.sieve_half_width);
    let target_relations = factor_base.len() + config.relation_margin;

    let mut relations: Vec<Relation> = Vec::new();
    let mut basis = GF2Basis::new(factor_base.len() + 1);

    while family.advance() {
        let Some(poly) = family.current() else { break };
        let found = sieve_polynomial(
            n,
            factor_base,
            &poly,
            family.roots(),
            config.sieve_half_width,
            config.smoothness_multiplier,
        );

        for relation in found {
            let vector = parity_vector(relation.is_negative, &relation.exponents, factor_base.len() + 1);
            let index = relations.len();
            relations.push(relation);

            if let Some(witness) = basis.insert(vector, index) {
                if let Some(factor) = extract_factor(n, factor_base, &relations, &witness) {
                    let other = n.div_trunc(&factor);
                    return Some(if factor <= other { (factor, other) } else { (other, factor) });
                }
            }
        }

        if relations.len() >= target_relations * 4 {
            // This polynomial family has produced far more relations than
            // expected without a useful dependency; let the caller
            // re-initialize with a fresh base-prime subset instead of
            // sieving the same family indefinitely.
            break;
        }
    }

    debug!("siqs: family exhausted with {} relations, no non-trivial factor", relations.len());
    None
}
