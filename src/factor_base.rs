// src/factor_base.rs
//
// Builds the ordered list of primes p with (N|p) = 1 that the sieve factors
// candidates over. 2 is deliberately excluded: Q(x) parity is handled by
// the sieve's x-range choice instead of a factor-base entry.

use crate::bigint::BigInt;
use crate::numtheory::{is_quadratic_residue, primes_below, tonelli_shanks};

/// One entry of the factor base: the prime itself, its contribution to the
/// log-sieve (`floor(log2 p)`), and `tmem = sqrt(N) mod p` used to seed the
/// per-polynomial root computation.
#[derive(Debug, Clone)]
pub struct FactorBasePrime {
    pub p: u64,
    pub log2p: u8,
    pub tmem: u64,
}

#[derive(Debug, Clone)]
pub struct FactorBase {
    pub primes: Vec<FactorBasePrime>,
}

impl FactorBase {
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Builds a factor base of (up to) `amount` primes p != 2 for which N is
    /// a quadratic residue. Candidates are drawn from `primes_below` at an
    /// expanding multiple of `amount` until enough survive the residue
    /// filter, since only roughly half of all odd primes pass it.
    pub fn build(n: &BigInt, amount: usize) -> FactorBase {
        let mut multiplier = 2usize;
        loop {
            let candidates = primes_below(amount * multiplier + 16);
            let mut primes = Vec::with_capacity(amount);
            for p in candidates {
                if p == 2 {
                    continue;
                }
                if primes.len() >= amount {
                    break;
                }
                if is_quadratic_residue(n, p) {
                    let tmem = tonelli_shanks(n, p).to_u64().expect("tmem fits in u64");
                    let log2p = (p as f64).log2().floor() as u8;
                    primes.push(FactorBasePrime { p, log2p, tmem });
                }
            }
            if primes.len() >= amount || multiplier > 64 {
                return FactorBase { primes };
            }
            multiplier *= 2;
        }
    }
}
