// src/bigint/div.rs
//
// Truncated division (`divmod_trunc`), the public non-negative `%`, and gcd.
//
// Division is schoolbook long division at limb granularity: one output
// limb at a time, each digit located by binary search over [0, 2^32). This
// is not Knuth's Algorithm D, but it is simple to get right and every
// digit produced is verified by the search's own invariant
// (`digit * divisor <= remainder < (digit+1) * divisor`).

use super::{BigInt, Sign};
use std::cmp::Ordering;

impl BigInt {
    /// (quotient, remainder) magnitudes with `num = quotient*den + remainder`
    /// and `remainder < den`. Panics if `den` is empty (division by zero).
    pub(crate) fn divmod_magnitude(num: &[u32], den: &[u32]) -> (Vec<u32>, Vec<u32>) {
        if den.is_empty() {
            panic!("BigInt division by zero");
        }
        if Self::cmp_magnitude(num, den) == Ordering::Less {
            return (Vec::new(), num.to_vec());
        }

        let mut quotient = vec![0u32; num.len()];
        let mut remainder: Vec<u32> = Vec::new();

        for i in (0..num.len()).rev() {
            // remainder = remainder * BASE + num[i]
            remainder.insert(0, num[i]);
            while matches!(remainder.last(), Some(0)) {
                remainder.pop();
            }

            if Self::cmp_magnitude(&remainder, den) == Ordering::Less {
                continue;
            }

            let mut lo: u64 = 0;
            let mut hi: u64 = u32::MAX as u64;
            while lo < hi {
                let mid = lo + (hi - lo + 1) / 2;
                let candidate = Self::mul_magnitude(den, &[mid as u32]);
                if Self::cmp_magnitude(&candidate, &remainder) != Ordering::Greater {
                    lo = mid;
                } else {
                    hi = mid - 1;
                }
            }
            quotient[i] = lo as u32;
            let subtrahend = Self::mul_magnitude(den, &[lo as u32]);
            remainder = Self::sub_magnitude(&remainder, &subtrahend);
        }

        while matches!(quotient.last(), Some(0)) {
            quotient.pop();
        }
        (quotient, remainder)
    }

    /// Single-limb division: `mag = quotient * divisor + remainder`.
    pub(crate) fn divmod_magnitude_small(mag: &[u32], divisor: u32) -> (Vec<u32>, u32) {
        let mut quotient = vec![0u32; mag.len()];
        let mut remainder: u64 = 0;
        for i in (0..mag.len()).rev() {
            let acc = (remainder << 32) | mag[i] as u64;
            quotient[i] = (acc / divisor as u64) as u32;
            remainder = acc % divisor as u64;
        }
        while matches!(quotient.last(), Some(0)) {
            quotient.pop();
        }
        (quotient, remainder as u32)
    }

    /// Truncated division: quotient rounds toward zero, remainder has the
    /// sign of `self` (or is zero). `self == (self/other)*other + self%other`.
    pub fn divmod_trunc(&self, other: &BigInt) -> (BigInt, BigInt) {
        if other.is_zero() {
            panic!("BigInt division by zero");
        }
        let (q_mag, r_mag) = Self::divmod_magnitude(&self.mag, &other.mag);
        let q_sign = if self.sign == other.sign { Sign::Plus } else { Sign::Minus };
        let quotient = BigInt::from_magnitude(q_sign, q_mag);
        let remainder = BigInt::from_magnitude(self.sign, r_mag);
        (quotient, remainder)
    }

    pub fn div_trunc(&self, other: &BigInt) -> BigInt {
        self.divmod_trunc(other).0
    }

    pub fn rem_trunc(&self, other: &BigInt) -> BigInt {
        self.divmod_trunc(other).1
    }

    /// Mathematical mod: result in `[0, |other|)` for `other != 0`. This is
    /// what the public `%` operator returns; sieve code that needs a
    /// truncating remainder must call `divmod_trunc` explicitly.
    pub fn rem_nonneg(&self, other: &BigInt) -> BigInt {
        let m = other.abs();
        let r = self.rem_trunc(&m);
        if r.is_negative() {
            &r + &m
        } else {
            r
        }
    }

    /// Non-negative gcd; `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        let mut a = self.abs();
        let mut b = other.abs();
        while !b.is_zero() {
            let r = a.rem_trunc(&b);
            a = b;
            b = r;
        }
        a
    }

    pub fn is_multiple_of(&self, other: &BigInt) -> bool {
        self.rem_trunc(other).is_zero()
    }
}

impl std::ops::Div for &BigInt {
    type Output = BigInt;
    fn div(self, rhs: &BigInt) -> BigInt {
        self.div_trunc(rhs)
    }
}

impl std::ops::Div<BigInt> for BigInt {
    type Output = BigInt;
    fn div(self, rhs: BigInt) -> BigInt {
        (&self).div_trunc(&rhs)
    }
}
impl std::ops::Div<&BigInt> for BigInt {
    type Output = BigInt;
    fn div(self, rhs: &BigInt) -> BigInt {
        (&self).div_trunc(rhs)
    }
}
impl std::ops::Div<BigInt> for &BigInt {
    type Output = BigInt;
    fn div(self, rhs: BigInt) -> BigInt {
        self.div_trunc(&rhs)
    }
}
impl std::ops::DivAssign<&BigInt> for BigInt {
    fn div_assign(&mut self, rhs: &BigInt) {
        *self = self.div_trunc(rhs);
    }
}
impl std::ops::DivAssign<BigInt> for BigInt {
    fn div_assign(&mut self, rhs: BigInt) {
        *self = self.div_trunc(&rhs);
    }
}

/// The public `%` operator: normalized into `[0, other)` for `other > 0`,
/// per the non-negative-mod contract the sieve relies on throughout.
impl std::ops::Rem for &BigInt {
    type Output = BigInt;
    fn rem(self, rhs: &BigInt) -> BigInt {
        self.rem_nonneg(rhs)
    }
}
impl std::ops::Rem<BigInt> for BigInt {
    type Output = BigInt;
    fn rem(self, rhs: BigInt) -> BigInt {
        (&self).rem_nonneg(&rhs)
    }
}
impl std::ops::Rem<&BigInt> for BigInt {
    type Output = BigInt;
    fn rem(self, rhs: &BigInt) -> BigInt {
        (&self).rem_nonneg(rhs)
    }
}
impl std::ops::Rem<BigInt> for &BigInt {
    type Output = BigInt;
    fn rem(self, rhs: BigInt) -> BigInt {
        self.rem_nonneg(&rhs)
    }
}
impl std::ops::RemAssign<&BigInt> for BigInt {
    fn rem_assign(&mut self, rhs: &BigInt) {
        *self = self.rem_nonneg(rhs);
    }
}
impl std::ops::RemAssign<BigInt> for BigInt {
    fn rem_assign(&mut self, rhs: BigInt) {
        *self = self.rem_nonneg(&rhs);
    }
}
