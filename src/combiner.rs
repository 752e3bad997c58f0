// src/combiner.rs
//
// Congruence combiner: turns a GF(2) dependency (a set of relation indices
// whose exponent-parity vectors XOR to zero) into an actual square
// congruence X^2 ≡ Y^2 (mod N), then extracts a factor via gcd.

use crate::bigint::BigInt;
use crate::factor_base::FactorBase;
use crate::siqs::sieve::Relation;

/// Attempts to extract a non-trivial factor from the dependency `witness`
/// (a set of indices into `relations`). Returns `None` if both `gcd(X-Y,N)`
/// and `gcd(X+Y,N)` are trivial (1 or N); the caller should try a different
/// dependency, or sieve for more relations if none remain.
pub fn extract_factor(
    n: &BigInt,
    factor_base: &FactorBase,
    relations: &[Relation],
    witness: &[usize],
) -> Option<BigInt> {
    let x = witness
        .iter()
        .fold(BigInt::one(), |acc, &i| (&acc * &relations[i].x).rem_nonneg(n));

    let mut exponent_sums = vec![0u32; factor_base.len()];
    for &i in witness {
        for (j, &exp) in relations[i].exponents.iter().enumerate() {
            exponent_sums[j] += exp;
        }
    }

    let y = exponent_sums.iter().enumerate().fold(BigInt::one(), |acc, (j, &sum)| {
        debug_assert_eq!(sum % 2, 0, "dependency produced an odd exponent sum");
        let half = sum / 2;
        if half == 0 {
            return acc;
        }
        let p = BigInt::from(factor_base.primes[j].p as i64);
        let contribution = p.modpow(&BigInt::from(half as i64), n);
        (&acc * &contribution).rem_nonneg(n)
    });

    let diff = &x - &y;
    let sum = &x + &y;
    let g1 = diff.gcd(n);
    let g2 = sum.gcd(n);

    for g in [g1, g2] {
        if !g.is_one() && &g != n {
            return Some(g);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(x: i64, is_negative: bool, exponents: Vec<u32>) -> Relation {
        Relation { x: BigInt::from(x), is_negative, exponents }
    }

    #[test]
    fn extract_factor_finds_known_split() {
        // N = 15 = 3*5. Relations chosen so that X^2 ≡ Y^2 (mod 15) non-trivially:
        // 4^2 = 16 ≡ 1 (mod 15), and 1^2 = 1. X=4, Y=1 -> gcd(3,15)=3, gcd(5,15)=5.
        let n = BigInt::from(15i64);
        let fb = FactorBase { primes: vec![] };
        let relations = vec![relation(4, false, vec![])];
        // Y is the empty product = 1, so gcd(4-1,15)=3.
        let factor = extract_factor(&n, &fb, &relations, &[0]);
        assert_eq!(factor, Some(BigInt::from(3i64)));
    }

    #[test]
    fn extract_factor_returns_none_on_trivial_split() {
        let n = BigInt::from(15i64);
        let fb = FactorBase { primes: vec![] };
        let relations = vec![relation(1, false, vec![])];
        assert_eq!(extract_factor(&n, &fb, &relations, &[0]), None);
    }
}
