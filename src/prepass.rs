// src/prepass.rs
//
// Small-factor pre-pass run before the sieve proper: trial division peels
// off tiny primes cheaply, and Pollard's rho (Floyd's cycle detection) picks
// off medium factors that would otherwise waste factor-base and sieving
// effort. Mirrors the teacher's `algorithms::trial_division` and
// `algorithms::pollard_rho`, adapted to the hand-rolled `BigInt`.

use crate::bigint::BigInt;
use log::debug;
use std::collections::BTreeMap;

/// Tracks the original number, the unfactored cofactor remaining, and the
/// multiset of prime factors already pulled out. Grounded on the teacher's
/// `CountDictionary`, keyed directly on `BigInt` (which implements `Ord`).
#[derive(Debug, Clone)]
pub struct Number {
    pub original: BigInt,
    pub cofactor: BigInt,
    pub factors: BTreeMap<BigInt, u32>,
}

impl Number {
    pub fn new(n: BigInt) -> Number {
        Number { original: n.clone(), cofactor: n, factors: BTreeMap::new() }
    }

    fn record_factor(&mut self, factor: BigInt) {
        *self.factors.entry(factor).or_insert(0) += 1;
    }

    /// True once the cofactor has been driven down to 1: every prime factor
    /// of the original number has been recorded.
    pub fn is_fully_factored(&self) -> bool {
        self.cofactor.is_one()
    }
}

/// Repeatedly applies trial division (up to `trial_division_bound`) and then
/// Pollard's rho (up to `pollard_rho_iterations` per attempt) to `number`,
/// recording every factor found. Stops when the cofactor is 1, is prime (no
/// further factor found by either method), or is small enough that trial
/// division alone proves primality.
///
/// Returns the `Number` with whatever factors were found; `is_fully_factored`
/// tells the caller whether the sieve still has work to do.
pub fn strip_small_factors(n: &BigInt, trial_division_bound: u64, pollard_rho_iterations: u64) -> Number {
    let mut number = Number::new(n.clone());

    loop {
        if number.cofactor.is_one() {
            break;
        }

        if let Some((p, q)) = trial_division(&number.cofactor, Some(trial_division_bound)) {
            debug!("prepass: trial division found factor {}", p);
            number.record_factor(p);
            number.cofactor = q;
            continue;
        }

        // No small factor remains. If the cofactor is itself below the
        // trial-division bound squared, trial division already proved it
        // prime (searched up to sqrt(cofactor)).
        if number.cofactor.bit_length() <= 64 {
            if let Some(c) = number.cofactor.to_u64() {
                if c <= trial_division_bound * trial_division_bound {
                    break;
                }
            }
        }

        match pollard_rho(&number.cofactor, pollard_rho_iterations) {
            Some((p, q)) => {
                debug!("prepass: pollard's rho found factor {}", p);
                number.record_factor(p);
                number.cofactor = q;
            }
            None => break,
        }
    }

    number
}

/// Attempts to factor `n` using trial division up to `limit` (or `sqrt(n)` if
/// `limit` is `None`). Returns `Some((p, q))` with `p <= q` and `p * q == n`,
/// or `None` if no factor was found within the bound.
pub fn trial_division(n: &BigInt, limit: Option<u64>) -> Option<(BigInt, BigInt)> {
    if !n.is_positive() || n.is_one() {
        return None;
    }

    if n.is_even() {
        let two = BigInt::from(2i64);
        let quotient = n.div_trunc(&two);
        return Some((two, quotient));
    }

    let sqrt_n = n.isqrt();
    let upper_bound = match limit {
        Some(lim) => {
            let lim_big = BigInt::from(lim as i64);
            if lim_big < sqrt_n { lim_big } else { sqrt_n }
        }
        None => sqrt_n,
    };

    let upper_bound_u64 = upper_bound.to_u64();

    if let Some(bound) = upper_bound_u64 {
        let mut divisor = 3u64;
        while divisor <= bound {
            let divisor_big = BigInt::from(divisor as i64);
            if n.is_multiple_of(&divisor_big) {
                let quotient = n.div_trunc(&divisor_big);
                return Some((divisor_big, quotient));
            }
            divisor += 2;
        }
    } else {
        let two = BigInt::from(2i64);
        let mut divisor = BigInt::from(3i64);
        while divisor <= upper_bound {
            if n.is_multiple_of(&divisor) {
                let quotient = n.div_trunc(&divisor);
                return Some((divisor, quotient));
            }
            divisor = &divisor + &two;
        }
    }

    None
}

/// Attempts to factor `n` with Floyd's cycle detection over `x -> x^2 + c
/// (mod n)`, trying a handful of constants `c` to dodge unlucky cycles.
pub fn pollard_rho(n: &BigInt, max_iterations: u64) -> Option<(BigInt, BigInt)> {
    if !n.is_positive() || n.is_one() {
        return None;
    }

    if n.is_even() {
        let two = BigInt::from(2i64);
        let quotient = n.div_trunc(&two);
        return Some((two, quotient));
    }

    for &c in &[1i64, 2, 3, 5, 7] {
        if let Some(factor) = pollard_rho_with_c(n, max_iterations, c) {
            return Some(factor);
        }
    }

    None
}

fn pollard_rho_with_c(n: &BigInt, max_iterations: u64, c: i64) -> Option<(BigInt, BigInt)> {
    let c_big = BigInt::from(c);
    let one = BigInt::one();

    let mut x = BigInt::from(2i64);
    let mut y = BigInt::from(2i64);
    let mut d = BigInt::one();

    let mut iterations = 0u64;
    while d.is_one() && iterations < max_iterations {
        x = (&(&x * &x) + &c_big).rem_nonneg(n);
        y = (&(&y * &y) + &c_big).rem_nonneg(n);
        y = (&(&y * &y) + &c_big).rem_nonneg(n);

        let diff = if x > y { &x - &y } else { &y - &x };
        d = diff.gcd(n);
        iterations += 1;
    }

    if d > one && &d < n {
        let quotient = n.div_trunc(&d);
        if d <= quotient { Some((d, quotient)) } else { Some((quotient, d)) }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_division_finds_small_composite() {
        let n = BigInt::from(143i64);
        let (p, q) = trial_division(&n, None).expect("143 = 11*13");
        assert_eq!(&p * &q, n);
        assert_eq!(p, BigInt::from(11i64));
        assert_eq!(q, BigInt::from(13i64));
    }

    #[test]
    fn trial_division_returns_none_for_prime() {
        let n = BigInt::from(97i64);
        assert_eq!(trial_division(&n, None), None);
    }

    #[test]
    fn trial_division_respects_limit() {
        let n = BigInt::from(143i64);
        assert!(trial_division(&n, Some(5)).is_none());
        assert!(trial_division(&n, Some(20)).is_some());
    }

    #[test]
    fn pollard_rho_finds_medium_composite() {
        let n = BigInt::from(8051i64); // 83 * 97
        let (p, q) = pollard_rho(&n, 100_000).expect("8051 = 83*97");
        assert_eq!(&p * &q, n);
        assert!(p > BigInt::one() && p < n);
    }

    #[test]
    fn run_fully_factors_a_product_of_small_primes() {
        let n = BigInt::from(2i64 * 2 * 3 * 5 * 97);
        let number = strip_small_factors(&n, 1000, 10_000);
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
    fn run_leaves_large_prime_cofactor_unfactored() {
        let n = BigInt::from(4175854084876627201i64);
        let number = strip_small_factors(&n, 1000, 1000);
        assert!(!number.is_fully_factored());
        assert_eq!(number.cofactor, n);
    }
}
