// src/bigint/roots.rs
//
// Integer square root via Newton's method, seeded from the decimal digit
// count so convergence is fast even for very large operands.

use super::BigInt;

impl BigInt {
    /// Floor of the square root. Panics on negative input.
    pub fn isqrt(&self) -> BigInt {
        if self.is_negative() {
            panic!("BigInt::isqrt: negative operand");
        }
        if self.is_zero() || self.is_one() {
            return self.clone();
        }

        let digits = self.to_string().trim_start_matches('-').len();
        let seed_exp = (digits + 1) / 2;
        let mut x = BigInt::from(10i64).pow_small(seed_exp as u32);

        let two = BigInt::from(2i64);
        loop {
            // x_next = (x + n/x) / 2
            let next = &(&x + &(self / &x)) / &two;
            if next >= x {
                break;
            }
            x = next;
        }
        // Newton's method converges from above for this recurrence; nudge
        // downward in case the fixed point overshot by one due to truncation.
        while &(&x * &x) > self {
            x = &x - &BigInt::one();
        }
        while &(&(&x + &BigInt::one()) * &(&x + &BigInt::one())) <= self {
            x = &x + &BigInt::one();
        }
        x
    }

    /// Smallest `r` with `r*r >= self`.
    pub fn ceil_sqrt(&self) -> BigInt {
        let floor = self.isqrt();
        if &(&floor * &floor) == self {
            floor
        } else {
            &floor + &BigInt::one()
        }
    }

    pub fn is_perfect_square(&self) -> bool {
        if self.is_negative() {
            return false;
        }
        let r = self.isqrt();
        &(&r * &r) == self
    }

    /// Base-2 logarithm as a float approximation; exact for powers of two,
    /// within floating-point rounding otherwise. Used for sieve thresholds,
    /// not exact arithmetic, so a one-ulp deviation is acceptable.
    pub fn log2(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        let bits = self.bit_length();
        if bits <= 64 {
            return (self.abs().to_f64()).log2();
        }
        // Use the top 64 bits plus the exponent shift to stay within f64 precision.
        let shift = bits - 64;
        let mag = self.abs();
        let top = mag.shr_bits(shift);
        top.to_f64().log2() + shift as f64
    }

    pub(crate) fn pow_small(&self, exponent: u32) -> BigInt {
        let mut result = BigInt::one();
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            e >>= 1;
        }
        result
    }

    /// Right-shift by `bits` positions (magnitude only; sign is preserved).
    pub(crate) fn shr_bits(&self, bits: usize) -> BigInt {
        if bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / 32;
        let bit_shift = bits % 32;
        if limb_shift >= self.mag.len() {
            return BigInt::zero();
        }
        let mut mag: Vec<u32> = self.mag[limb_shift..].to_vec();
        if bit_shift > 0 {
            let mut carry = 0u32;
            for limb in mag.iter_mut().rev() {
                let new_carry = *limb << (32 - bit_shift);
                *limb = (*limb >> bit_shift) | carry;
                carry = new_carry;
            }
        }
        BigInt::from_magnitude(self.sign, mag)
    }
}
