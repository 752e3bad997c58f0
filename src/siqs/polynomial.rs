// src/siqs/polynomial.rs
//
// Self-initializing polynomial family: one base-prime product `a` seeds a
// Gray-code sequence of up to 2^(s-1) polynomials Q(x) = ((a*x+b)^2 - N)/a,
// each differing from its predecessor by a single ±2*B_i update to `b`.

use crate::bigint::BigInt;
use crate::factor_base::FactorBase;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// One polynomial of the family: `Q(x) = ((a*x + b)^2 - N) / a`.
#[derive(Debug, Clone)]
pub struct Polynomial {
    pub a: BigInt,
    pub b: BigInt,
    /// Factor-base indices of the primes whose product is `a`; these divide
    /// every `Q(x)` and are skipped by the sieve's per-prime root walk.
    pub base_prime_indices: Vec<usize>,
}

impl Polynomial {
    /// `a*x + b`, the quantity whose square is congruent to `N` mod `a`.
    pub fn ax_plus_b(&self, x: &BigInt) -> BigInt {
        &(&self.a * x) + &self.b
    }

    /// `Q(x) = ((a*x+b)^2 - N) / a`, the value the sieve trial-divides.
    pub fn evaluate(&self, x: &BigInt, n: &BigInt) -> BigInt {
        let u = self.ax_plus_b(x);
        let numerator = &(&u * &u) - n;
        numerator.div_trunc(&self.a)
    }
}

/// Per-prime root pair of `Q(x) ≡ 0 (mod p)`, indexed in lock-step with the
/// factor base.
pub type RootPair = (u64, u64);

/// Self-initializing generator: holds everything needed to emit the Gray-
/// code sequence of polynomials for one base-prime product `a`, plus the
/// per-prime incremental root state the sieve consumes each step.
pub struct PolynomialFamily<'a> {
    n: BigInt,
    factor_base: &'a FactorBase,
    base_prime_indices: Vec<usize>,
    a: BigInt,
    /// B_i values, one per base prime.
    b_values: Vec<BigInt>,
    /// delta[prime_idx][i] = (2*B_i*a^-1) mod p, for every factor-base prime.
    delta: Vec<Vec<u64>>,
    /// a^-1 mod p for every factor-base prime, needed for the first-
    /// polynomial root computation.
    a_inv: Vec<u64>,
    b: BigInt,
    roots: Vec<RootPair>,
    counter: u64,
    max_k: u64,
}

impl<'a> PolynomialFamily<'a> {
    pub fn max_polynomials(&self) -> u64 {
        self.max_k
    }

    pub fn base_prime_indices(&self) -> &[usize] {
        &self.base_prime_indices
    }

    pub fn roots(&self) -> &[RootPair] {
        &self.roots
    }

    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Initializes a new family: picks base primes, computes `a`, the
    /// `B_i`, the delta matrix, and the first polynomial's roots.
    pub fn initialize(
        n: &BigInt,
        factor_base: &'a FactorBase,
        rng: &mut ChaCha8Rng,
        sieve_half_width: i64,
    ) -> PolynomialFamily<'a> {
        let base_prime_indices = select_base_primes(n, factor_base, rng, sieve_half_width);
        let a = base_prime_indices
            .iter()
            .fold(BigInt::one(), |acc, &idx| &acc * &BigInt::from(factor_base.primes[idx].p as i64));

        let b_values: Vec<BigInt> = base_prime_indices
            .iter()
            .map(|&idx| compute_b_i(factor_base, &a, idx))
            .collect();

        let delta: Vec<Vec<u64>> = factor_base
            .primes
            .iter()
            .map(|entry| {
                let p = entry.p;
                if base_prime_indices.iter().any(|&idx| factor_base.primes[idx].p == p) {
                    return vec![0u64; b_values.len()];
                }
                let p_big = BigInt::from(p as i64);
                let a_inv_p = a.rem_nonneg(&p_big).mod_inverse(&p_big);
                b_values
                    .iter()
                    .map(|b_i| {
                        let two_bi = &(&BigInt::from(2i64) * b_i) * &a_inv_p;
                        two_bi.rem_nonneg(&p_big).to_u64().expect("delta fits in u64")
                    })
                    .collect()
            })
            .collect();

        let a_inv: Vec<u64> = factor_base
            .primes
            .iter()
            .map(|entry| {
                let p = entry.p;
                if base_prime_indices.iter().any(|&idx| factor_base.primes[idx].p == p) {
                    0
                } else {
                    let p_big = BigInt::from(p as i64);
                    a.rem_nonneg(&p_big).mod_inverse(&p_big).to_u64().expect("a_inv fits in u64")
                }
            })
            .collect();

        // b0 = sum(B_i), the all-positive-signs combination; this is the
        // start of the Gray-code traversal and is left exactly as summed
        // (no modular reduction) so that later ± delta updates telescope
        // back to the correct signed combination at every step.
        let b0 = b_values.iter().fold(BigInt::zero(), |acc, b_i| &acc + b_i);
        let b = reduce_if_overflow(&b0, &a);

        let s = base_prime_indices.len() as u32;
        let max_k = if s == 0 { 1 } else { 1u64 << (s - 1) };

        let mut family = PolynomialFamily {
            n: n.clone(),
            factor_base,
            base_prime_indices,
            a,
            b_values,
            delta,
            a_inv,
            b,
            roots: Vec::new(),
            counter: 0,
            max_k,
        };
        family.roots = family.compute_roots_from_scratch();
        family
    }

    fn compute_roots_from_scratch(&self) -> Vec<RootPair> {
        self.factor_base
            .primes
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if self.base_prime_indices.contains(&idx) {
                    return (0, 0);
                }
                let p = entry.p;
                let p_big = BigInt::from(p as i64);
                let ainv = BigInt::from(self.a_inv[idx] as i64);
                let tmem = BigInt::from(entry.tmem as i64);
                let r1 = (&(&tmem - &self.b) * &ainv).rem_nonneg(&p_big).to_u64().unwrap();
                let r2 = (&(&(-&tmem) - &self.b) * &ainv).rem_nonneg(&p_big).to_u64().unwrap();
                (r1, r2)
            })
            .collect()
    }

    /// Returns the current `(a, b)` polynomial, or `None` once the family
    /// is exhausted.
    pub fn current(&self) -> Option<Polynomial> {
        if self.counter == 0 || self.counter > self.max_k {
            return None;
        }
        Some(Polynomial {
            a: self.a.clone(),
            b: self.b.clone(),
            base_prime_indices: self.base_prime_indices.clone(),
        })
    }

    /// Advances to the next polynomial in Gray-code order, updating `b` and
    /// every factor-base prime's roots incrementally. Returns `false` once
    /// the family is exhausted.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter > self.max_k {
            return false;
        }
        if self.counter == 1 {
            return true;
        }

        // The Gray-code counter is zero-based with the all-positive-signs
        // combination (b0) at position 0; `self.counter` is the 1-based
        // polynomial index, so `m = counter - 1` is that zero-based counter.
        let m = self.counter - 1;
        let i = m.trailing_zeros() as usize;
        let two_pow_i1 = 1u64 << (i + 1);
        let ceil_div = (m + two_pow_i1 - 1) / two_pow_i1;
        let sign_positive = ceil_div % 2 == 0;

        let b_i = &self.b_values[i];
        let delta_b = &(&BigInt::from(2i64) * b_i);
        self.b = if sign_positive { &self.b + delta_b } else { &self.b - delta_b };
        self.b = reduce_if_overflow(&self.b, &self.a);

        for (idx, entry) in self.factor_base.primes.iter().enumerate() {
            if self.base_prime_indices.contains(&idx) {
                continue;
            }
            let p = entry.p;
            let d = self.delta[idx][i];
            let (r1, r2) = self.roots[idx];
            self.roots[idx] = if sign_positive {
                (add_mod(r1, d, p), add_mod(r2, d, p))
            } else {
                (sub_mod(r1, d, p), sub_mod(r2, d, p))
            };
        }
        true
    }
}

/// Wraps `b` by a multiple of `a` only when its magnitude has grown past
/// `a` (which preserves `b mod a`, so `b^2 ≡ N (mod a)` still holds); left
/// untouched otherwise, since the Gray-code telescoping sum is usually
/// already bounded and an unconditional reduction would obscure the literal
/// running values the traversal is defined to produce.
fn reduce_if_overflow(b: &BigInt, a: &BigInt) -> BigInt {
    if &b.abs() < a {
        return b.clone();
    }
    let residue = b.rem_nonneg(a);
    let half = a.div_trunc(&BigInt::from(2i64));
    if residue > half {
        &residue - a
    } else {
        residue
    }
}

fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    (a + b) % p
}

fn sub_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a + p) - (b % p)) % p
}

fn compute_b_i(factor_base: &FactorBase, a: &BigInt, idx: usize) -> BigInt {
    let entry = &factor_base.primes[idx];
    let q = BigInt::from(entry.p as i64);
    let a_div_q = a.div_trunc(&q);
    let a_div_q_inv = a_div_q.rem_nonneg(&q).mod_inverse(&q);

    let sqrt_n_mod_q = BigInt::from(entry.tmem as i64);
    let gamma_plus = (&sqrt_n_mod_q * &a_div_q_inv).rem_nonneg(&q);
    let gamma_minus = (&q - &gamma_plus).rem_nonneg(&q);
    let gamma = if gamma_plus < gamma_minus { gamma_plus } else { gamma_minus };

    &a_div_q * &gamma
}

/// Samples a subset of the factor base in the mid-range `[1000, 3000]`
/// whose product approximates `sqrt(2N)/M`; falls back to the top third of
/// the factor base when that range has too few candidates (small N).
fn select_base_primes(
    n: &BigInt,
    factor_base: &FactorBase,
    rng: &mut ChaCha8Rng,
    sieve_half_width: i64,
) -> Vec<usize> {
    let target_a = {
        let two_n = &BigInt::from(2i64) * n;
        two_n.isqrt().div_trunc(&BigInt::from(sieve_half_width.max(1)))
    };

    let mid_range: Vec<usize> = factor_base
        .primes
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.p >= 1000 && entry.p <= 3000)
        .map(|(idx, _)| idx)
        .collect();

    let pool: Vec<usize> = if mid_range.len() >= 3 {
        mid_range
    } else {
        let len = factor_base.len();
        let start = len.saturating_sub(len / 3).max(0);
        (start..len).collect()
    };

    if pool.is_empty() {
        return Vec::new();
    }

    let mut shuffled = pool.clone();
    shuffled.shuffle(rng);

    let mut selected = Vec::new();
    let mut product = BigInt::one();
    for idx in shuffled {
        if selected.len() >= 62 {
            break;
        }
        product = &product * &BigInt::from(factor_base.primes[idx].p as i64);
        selected.push(idx);
        if product >= target_a {
            break;
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_base::FactorBase;
    use rand::SeedableRng;

    #[test]
    fn polynomial_satisfies_b_squared_congruence() {
        let n = BigInt::from(291i64);
        let fb = FactorBase::build(&n, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut family = PolynomialFamily::initialize(&n, &fb, &mut rng, 50);

        while family.advance() {
            if let Some(poly) = family.current() {
                let lhs = (&poly.b * &poly.b).rem_nonneg(&poly.a);
                let rhs = n.rem_nonneg(&poly.a);
                assert_eq!(lhs, rhs);
                assert!(poly.b.abs() < poly.a);
            }
        }
    }

    #[test]
    fn family_with_fixed_base_primes_matches_spec_scenario() {
        // N = 291, base primes {5, 7, 11}: a = 385, b in {334, 26, -194, 114}.
        let n = BigInt::from(291i64);
        let fb = FactorBase {
            primes: [5u64, 7, 11]
                .iter()
                .map(|&p| {
                    let tmem = crate::numtheory::tonelli_shanks(&n, p).to_u64().unwrap();
                    crate::factor_base::FactorBasePrime { p, log2p: (p as f64).log2() as u8, tmem }
                })
                .collect(),
        };
        let base_prime_indices = vec![0usize, 1, 2];
        let a = base_prime_indices
            .iter()
            .fold(BigInt::one(), |acc, &idx| &acc * &BigInt::from(fb.primes[idx].p as i64));
        assert_eq!(a, BigInt::from(385i64));

        let b_values: Vec<BigInt> = base_prime_indices.iter().map(|&idx| compute_b_i(&fb, &a, idx)).collect();
        let mut family = PolynomialFamily {
            n: n.clone(),
            factor_base: &fb,
            base_prime_indices: base_prime_indices.clone(),
            a: a.clone(),
            b_values,
            delta: vec![vec![0; 3]; fb.len()],
            a_inv: vec![0; fb.len()],
            b: BigInt::zero(),
            roots: Vec::new(),
            counter: 0,
            max_k: 4,
        };
        family.b = family.b_values.iter().fold(BigInt::zero(), |acc, b| &acc + b);
        family.roots = vec![(0, 0); fb.len()];

        let mut emitted = Vec::new();
        while family.advance() {
            if let Some(poly) = family.current() {
                emitted.push(poly.b.to_string());
            }
        }
        let expected: Vec<String> = ["334", "26", "-194", "114"].iter().map(|s| s.to_string()).collect();
        assert_eq!(emitted, expected);
    }
}
