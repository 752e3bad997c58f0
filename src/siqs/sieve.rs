// src/siqs/sieve.rs
//
// Log-based additive sieving over one polynomial's [-M, M] range, followed
// by trial division of any candidate whose accumulated log exceeds the
// size-dependent smoothness threshold.

use crate::bigint::BigInt;
use crate::factor_base::FactorBase;
use crate::siqs::polynomial::{Polynomial, RootPair};
use rayon::prelude::*;

/// A fully factored sieve hit: `x = a*u + b` for some `u` in `[-M, M]`, with
/// `y = x^2 - N` smooth over the factor base (`exponents[j]` is the full,
/// non-negative exponent of `factor_base.primes[j]` in `|y|`).
#[derive(Debug, Clone)]
pub struct Relation {
    pub x: BigInt,
    pub is_negative: bool,
    pub exponents: Vec<u32>,
}

/// Sieves one polynomial and returns every relation found. `threshold_mult`
/// is the configurable smoothness-cutoff fraction (spec default `2/3`).
pub fn sieve_polynomial(
    n: &BigInt,
    factor_base: &FactorBase,
    poly: &Polynomial,
    roots: &[RootPair],
    half_width: i64,
    threshold_mult: f64,
) -> Vec<Relation> {
    let width = (2 * half_width + 1) as usize;
    let mut log_array = vec![0u32; width];
    let half_log2_n = 0.5 * n.log2();

    for (idx, entry) in factor_base.primes.iter().enumerate() {
        if poly.base_prime_indices.contains(&idx) {
            continue;
        }
        let p = entry.p as i64;
        let (r1, r2) = roots[idx];
        let log_p = entry.log2p as u32;

        add_log_along_root(&mut log_array, r1 as i64, p, half_width, log_p);
        if r2 != r1 {
            add_log_along_root(&mut log_array, r2 as i64, p, half_width, log_p);
        }
    }

    let candidates: Vec<i64> = log_array
        .iter()
        .enumerate()
        .filter_map(|(i, &accumulated)| {
            let u = i as i64 - half_width;
            if u == 0 {
                return None;
            }
            let threshold = smoothness_threshold(u, half_log2_n, threshold_mult);
            if (accumulated as f64) < threshold {
                return None;
            }
            Some(u)
        })
        .collect();

    candidates
        .par_iter()
        .filter_map(|&u| trial_divide_candidate(n, factor_base, poly, u))
        .collect()
}

fn trial_divide_candidate(n: &BigInt, factor_base: &FactorBase, poly: &Polynomial, u: i64) -> Option<Relation> {
    let u_big = BigInt::from(u);
    let x = poly.ax_plus_b(&u_big);
    let y = &(&x * &x) - n;
    if y.is_zero() {
        return None;
    }
    let is_negative = y.is_negative();
    // y = x^2 - N = a * Q(x); divide out a's contribution before trial
    // dividing the rest of the factor base, matching the exponents seeded
    // below (each base prime appears exactly once, a being squarefree).
    let mut remaining = y.abs().div_trunc(&poly.a);

    let mut exponents = vec![0u32; factor_base.len()];
    for &base_idx in &poly.base_prime_indices {
        exponents[base_idx] += 1;
    }

    for (idx, entry) in factor_base.primes.iter().enumerate() {
        if poly.base_prime_indices.contains(&idx) {
            continue;
        }
        let p_big = BigInt::from(entry.p as i64);
        while remaining.is_multiple_of(&p_big) && !remaining.is_zero() {
            remaining = remaining.div_trunc(&p_big);
            exponents[idx] += 1;
        }
    }

    if remaining.is_one() {
        Some(Relation { x, is_negative, exponents })
    } else {
        None
    }
}

fn add_log_along_root(log_array: &mut [u32], root: i64, p: i64, half_width: i64, log_p: u32) {
    let lower = -half_width;
    let diff = ((root - lower) % p + p) % p;
    let mut x = lower + diff;
    while x <= half_width {
        let idx = (x + half_width) as usize;
        log_array[idx] += log_p;
        x += p;
    }
}

fn smoothness_threshold(u: i64, half_log2_n: f64, threshold_mult: f64) -> f64 {
    let magnitude = 2.0 * (u.unsigned_abs() as f64);
    let log2_term = magnitude.log2() + half_log2_n;
    (threshold_mult * log2_term).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_base::FactorBase;
    use crate::siqs::polynomial::PolynomialFamily;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn sieved_relations_satisfy_y_equals_x_squared_minus_n() {
        let n = BigInt::from(4175854084876627201i64);
        let fb = FactorBase::build(&n, 60);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut family = PolynomialFamily::initialize(&n, &fb, &mut rng, 2000);

        let mut all_relations = Vec::new();
        while family.advance() {
            if let Some(poly) = family.current() {
                let relations = sieve_polynomial(&n, &fb, &poly, family.roots(), 2000, 0.65);
                all_relations.extend(relations);
            }
        }

        for rel in &all_relations {
            let y = &(&rel.x * &rel.x) - &n;
            assert_eq!(y.is_negative(), rel.is_negative);
            let mut reconstructed = BigInt::one();
            for (idx, &exp) in rel.exponents.iter().enumerate() {
                if exp == 0 {
                    continue;
                }
                let p = BigInt::from(fb.primes[idx].p as i64);
                for _ in 0..exp {
                    reconstructed = &reconstructed * &p;
                }
            }
            assert_eq!(reconstructed, y.abs());
        }
    }
}
