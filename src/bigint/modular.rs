// src/bigint/modular.rs
//
// Modular exponentiation and modular inverse.

use super::BigInt;

impl BigInt {
    /// Right-to-left binary exponentiation. `modulus == 0` is the
    /// unreduced-power convention: `modpow(base, exp, 0) == base.pow(exp)`.
    /// Panics on a negative exponent.
    pub fn modpow(&self, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        if exponent.is_negative() {
            panic!("BigInt::modpow: negative exponent");
        }
        if modulus.is_zero() {
            return self.pow_unreduced(exponent);
        }
        if modulus.is_one() || modulus.abs().is_one() {
            return BigInt::zero();
        }

        let mut result = BigInt::one();
        let mut base = self.rem_nonneg(modulus);
        let mut exp = exponent.clone();
        let two = BigInt::from(2i64);

        while !exp.is_zero() {
            let (q, r) = exp.divmod_trunc(&two);
            if !r.is_zero() {
                result = (&result * &base).rem_nonneg(modulus);
            }
            base = (&base * &base).rem_nonneg(modulus);
            exp = q;
        }
        result
    }

    fn pow_unreduced(&self, exponent: &BigInt) -> BigInt {
        let mut result = BigInt::one();
        let mut base = self.clone();
        let mut exp = exponent.clone();
        let two = BigInt::from(2i64);
        while !exp.is_zero() {
            let (q, r) = exp.divmod_trunc(&two);
            if !r.is_zero() {
                result = &result * &base;
            }
            base = &base * &base;
            exp = q;
        }
        result
    }

    /// Multiplicative inverse of `self` modulo `m`, in `[0, m)`. Panics if
    /// `gcd(self, m) != 1` (no inverse exists) — this is a caller error per
    /// the same contract as division by zero.
    pub fn mod_inverse(&self, m: &BigInt) -> BigInt {
        let m_abs = m.abs();
        let (mut old_r, mut r) = (self.rem_nonneg(&m_abs), m_abs.clone());
        let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

        while !r.is_zero() {
            let q = old_r.div_trunc(&r);
            let new_r = &old_r - &(&q * &r);
            old_r = r;
            r = new_r;
            let new_s = &old_s - &(&q * &s);
            old_s = s;
            s = new_s;
        }

        if !old_r.is_one() {
            panic!("BigInt::mod_inverse: {} has no inverse mod {}", self, m);
        }
        old_s.rem_nonneg(&m_abs)
    }
}
