// src/bigint/mul.rs
//
// Schoolbook multiplication below `KARATSUBA_CUTOFF` limbs, Karatsuba above.

use super::{BigInt, Sign, KARATSUBA_CUTOFF};

impl BigInt {
    pub(crate) fn mul_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }
        if a.len().max(b.len()) <= KARATSUBA_CUTOFF {
            schoolbook(a, b)
        } else {
            karatsuba(a, b)
        }
    }
}

fn schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry: u64 = 0;
        for (j, &y) in b.iter().enumerate() {
            let product = x as u64 * y as u64 + result[i + j] + carry;
            result[i + j] = product & 0xFFFF_FFFF;
            carry = product >> 32;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let sum = result[k] + carry;
            result[k] = sum & 0xFFFF_FFFF;
            carry = sum >> 32;
            k += 1;
        }
    }
    let mut out: Vec<u32> = result.into_iter().map(|limb| limb as u32).collect();
    while matches!(out.last(), Some(0)) {
        out.pop();
    }
    out
}

/// a = a_hi * BASE^split + a_lo, likewise for b.
/// a*b = a_hi*b_hi*BASE^(2*split) + (a_hi*b_lo + a_lo*b_hi)*BASE^split + a_lo*b_lo
/// computed as z2*BASE^(2*split) + (z0+z2-z1... ) via the standard 3-multiply trick:
/// z0 = a_lo*b_lo, z2 = a_hi*b_hi, z1 = (a_lo+a_hi)*(b_lo+b_hi) - z0 - z2
fn karatsuba(a: &[u32], b: &[u32]) -> Vec<u32> {
    let split = a.len().max(b.len()) / 2;

    let (a_lo, a_hi) = split_at(a, split);
    let (b_lo, b_hi) = split_at(b, split);

    let z0 = BigInt::mul_magnitude(a_lo, b_lo);
    let z2 = BigInt::mul_magnitude(a_hi, b_hi);

    let a_sum = BigInt::add_magnitude(a_lo, a_hi);
    let b_sum = BigInt::add_magnitude(b_lo, b_hi);
    let z1_full = BigInt::mul_magnitude(&a_sum, &b_sum);

    // z1 = z1_full - z0 - z2 (always non-negative for these operands)
    let z1_minus_z0 = BigInt::sub_magnitude(&pad(&z1_full, z0.len()), &z0);
    let z1 = BigInt::sub_magnitude(&pad(&z1_minus_z0, z2.len()), &z2);

    let mut result = z0;
    add_shifted(&mut result, &z1, split);
    add_shifted(&mut result, &z2, 2 * split);
    while matches!(result.last(), Some(0)) {
        result.pop();
    }
    result
}

fn split_at(v: &[u32], at: usize) -> (&[u32], &[u32]) {
    if at >= v.len() {
        (v, &[])
    } else {
        v.split_at(at)
    }
}

fn pad(v: &[u32], min_len: usize) -> Vec<u32> {
    if v.len() >= min_len {
        v.to_vec()
    } else {
        let mut out = v.to_vec();
        out.resize(min_len, 0);
        out
    }
}

fn add_shifted(acc: &mut Vec<u32>, addend: &[u32], shift: usize) {
    if addend.is_empty() {
        return;
    }
    if acc.len() < shift + addend.len() {
        acc.resize(shift + addend.len(), 0);
    }
    let mut carry: u64 = 0;
    for i in 0..addend.len() {
        let sum = acc[shift + i] as u64 + addend[i] as u64 + carry;
        acc[shift + i] = sum as u32;
        carry = sum >> 32;
    }
    let mut k = shift + addend.len();
    while carry > 0 {
        if k >= acc.len() {
            acc.push(0);
        }
        let sum = acc[k] as u64 + carry;
        acc[k] = sum as u32;
        carry = sum >> 32;
        k += 1;
    }
}

impl std::ops::Mul for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: &BigInt) -> BigInt {
        let mag = BigInt::mul_magnitude(&self.mag, &rhs.mag);
        let sign = if self.sign == rhs.sign { Sign::Plus } else { Sign::Minus };
        BigInt::from_magnitude(sign, mag)
    }
}

impl std::ops::Mul<BigInt> for BigInt {
    type Output = BigInt;
    fn mul(self, rhs: BigInt) -> BigInt {
        (&self) * (&rhs)
    }
}
impl std::ops::Mul<&BigInt> for BigInt {
    type Output = BigInt;
    fn mul(self, rhs: &BigInt) -> BigInt {
        (&self) * rhs
    }
}
impl std::ops::Mul<BigInt> for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: BigInt) -> BigInt {
        self * (&rhs)
    }
}
impl std::ops::MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        *self = &*self * rhs;
    }
}
impl std::ops::MulAssign<BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: BigInt) {
        *self = &*self * &rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::super::BigInt;
    use std::str::FromStr;

    #[test]
    fn small_multiplication() {
        let a = BigInt::from(123456789i64);
        let b = BigInt::from(987654321i64);
        let product = &a * &b;
        assert_eq!(product.to_string(), "121932631112635269");
    }

    #[test]
    fn karatsuba_matches_schoolbook_on_large_operands() {
        // ~40 digit operands, large enough to exercise the Karatsuba path.
        let a = BigInt::from_str("19283746517263984756102938475610293847561").unwrap();
        let b = a.clone();
        let product = &a * &b;
        // Golden value computed independently (a^2).
        let expected = "371862879742090861531151956596485314777246512464708354621544082199320809105648721";
        assert_eq!(product.to_string(), expected);
    }

    #[test]
    fn multiply_by_zero() {
        let a = BigInt::from(12345i64);
        let zero = BigInt::zero();
        assert_eq!((&a * &zero).to_string(), "0");
    }

    #[test]
    fn sign_rules() {
        let a = BigInt::from(-6i64);
        let b = BigInt::from(7i64);
        assert_eq!((&a * &b).to_string(), "-42");
        assert_eq!((&a * &a).to_string(), "36");
    }
}
