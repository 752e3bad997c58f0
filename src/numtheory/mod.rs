// src/numtheory/mod.rs
//
// Small-prime sieving, Legendre symbol, and Tonelli-Shanks modular square
// root. These sit directly below the factor-base builder and the SIQS
// polynomial generator, both of which call `tonelli_shanks` and
// `legendre_symbol` on every candidate prime.

mod sieve;
mod tonelli;

pub use sieve::{primes_below, sieve_of_eratosthenes, prime_bound_for_count};
pub use tonelli::tonelli_shanks;

use crate::bigint::BigInt;

/// Euler's criterion: `1` if `a` is a quadratic residue mod the odd prime
/// `p`, `p - 1` otherwise (i.e. the Legendre symbol, mapped onto `{1, p-1}`
/// rather than `{1, -1}` so it lives comfortably in `0..p`).
pub fn legendre_symbol(a: &BigInt, p: u64) -> u64 {
    if p == 2 {
        panic!("legendre_symbol: p must be an odd prime");
    }
    let p_big = BigInt::from(p);
    let exponent = BigInt::from((p - 1) / 2);
    let residue = a.rem_nonneg(&p_big);
    if residue.is_zero() {
        return 0;
    }
    let r = residue.modpow(&exponent, &p_big);
    r.to_u64().expect("legendre residue fits in u64")
}

/// `true` iff `a` is a nonzero quadratic residue mod the odd prime `p`.
pub fn is_quadratic_residue(a: &BigInt, p: u64) -> bool {
    legendre_symbol(a, p) == 1
}
