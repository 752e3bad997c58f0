// src/numtheory/tonelli.rs
//
// Tonelli-Shanks modular square root, per the five-step algorithm: factor
// p-1 = q*2^s, find a quadratic non-residue z, then repeatedly halve the
// order of t until it collapses to 1.

use crate::bigint::BigInt;
use super::legendre_symbol;

/// Returns a root `r` in `[0, p)` with `r*r ≡ n (mod p)`. The other root is
/// `p - r`; which of the pair comes out is whatever the algorithm's final
/// `R` accumulator holds, not forced to the smaller of the two. Panics if
/// `n` is not a quadratic residue mod `p`, or if `p == 2` (factor-base
/// construction handles 2 separately and never routes it here).
pub fn tonelli_shanks(n: &BigInt, p: u64) -> BigInt {
    if p == 2 {
        panic!("tonelli_shanks: p must be an odd prime");
    }
    let p_big = BigInt::from(p);
    let n = n.rem_nonneg(&p_big);

    if n.is_zero() {
        return BigInt::zero();
    }
    if legendre_symbol(&n, p) != 1 {
        panic!("tonelli_shanks: {} is not a quadratic residue mod {}", n, p);
    }

    // Special-case p ≡ 3 (mod 4): r = n^((p+1)/4) directly.
    if p % 4 == 3 {
        let exp = BigInt::from((p + 1) / 4);
        return n.modpow(&exp, &p_big);
    }

    // 1. Factor p - 1 = q * 2^s with q odd.
    let mut q = p - 1;
    let mut s = 0u32;
    while q % 2 == 0 {
        q /= 2;
        s += 1;
    }

    // 2. Find the smallest quadratic non-residue z >= 2.
    let mut z: u64 = 2;
    while legendre_symbol(&BigInt::from(z as i64), p) != p - 1 {
        z += 1;
    }

    // 3. Initialize M, c, t, R.
    let q_big = BigInt::from(q);
    let mut m = s;
    let mut c = BigInt::from(z as i64).modpow(&q_big, &p_big);
    let mut t = n.modpow(&q_big, &p_big);
    let mut r = n.modpow(&BigInt::from((q + 1) / 2), &p_big);

    loop {
        if t.is_zero() {
            return BigInt::zero();
        }
        if t.is_one() {
            return r;
        }

        // Find least i >= 1 with t^(2^i) == 1.
        let mut i = 1u32;
        let mut t_pow = (&t * &t).rem_nonneg(&p_big);
        while !t_pow.is_one() {
            t_pow = (&t_pow * &t_pow).rem_nonneg(&p_big);
            i += 1;
            if i >= m {
                panic!("tonelli_shanks: failed to converge, {} is not a residue mod {}", n, p);
            }
        }

        let exp = BigInt::from(2i64).pow_small(m - i - 1);
        let b = c.modpow(&exp, &p_big);
        m = i;
        c = (&b * &b).rem_nonneg(&p_big);
        t = (&t * &c).rem_nonneg(&p_big);
        r = (&r * &b).rem_nonneg(&p_big);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tonelli_matches_spec_example_5_mod_41() {
        let r = tonelli_shanks(&BigInt::from(5i64), 41);
        assert_eq!(r.to_string(), "28");
        let p = BigInt::from(41i64);
        assert_eq!((&r * &r).rem_nonneg(&p), BigInt::from(5i64));
    }

    #[test]
    fn tonelli_matches_spec_example_large() {
        let r = tonelli_shanks(&BigInt::from(19641285i64), 39916801);
        assert_eq!(r.to_string(), "231232");
        let p = BigInt::from(39916801i64);
        let n = BigInt::from(19641285i64);
        assert_eq!((&r * &r).rem_nonneg(&p), n.rem_nonneg(&p));
    }

    #[test]
    fn tonelli_handles_p_congruent_3_mod_4() {
        // 7 mod 4 == 3; any residue exercises the fast path.
        let r = tonelli_shanks(&BigInt::from(2i64), 7);
        let p = BigInt::from(7i64);
        assert_eq!((&r * &r).rem_nonneg(&p), BigInt::from(2i64));
    }

    #[test]
    #[should_panic]
    fn tonelli_panics_on_non_residue() {
        let _ = tonelli_shanks(&BigInt::from(3i64), 7);
    }
}
