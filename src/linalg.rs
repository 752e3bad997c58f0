// src/linalg.rs
//
// GF(2) linear algebra over relation exponent-parity vectors: an
// incremental reduced basis (as opposed to the dense Gaussian elimination
// a batch solver would use), so a dependency can be reported as soon as one
// exists instead of waiting for every relation to be collected up front.

use bitvec::prelude::*;

/// `basis[j]`, if occupied, holds a vector whose leading set bit is at
/// position `j`, paired with the set of original relation indices whose
/// XOR produces it.
#[derive(Default)]
pub struct GF2Basis {
    width: usize,
    basis: Vec<Option<(BitVec, Vec<usize>)>>,
}

impl GF2Basis {
    pub fn new(width: usize) -> GF2Basis {
        GF2Basis { width, basis: (0..width).map(|_| None).collect() }
    }

    /// Reduces `vector` against the current basis, tracking which original
    /// relation indices (starting from `{relation_index}`) combine to the
    /// result. If the vector reduces to all-zero, the accumulated witness
    /// set is returned as a non-empty linear dependency. Otherwise the
    /// (now-reduced) vector is inserted into the basis at its leading bit
    /// and `None` is returned.
    pub fn insert(&mut self, mut vector: BitVec, relation_index: usize) -> Option<Vec<usize>> {
        let mut witness = vec![relation_index];

        loop {
            let leading = vector.iter_ones().next();
            let Some(j) = leading else {
                return Some(witness);
            };
            match &self.basis[j] {
                None => {
                    self.basis[j] = Some((vector, witness));
                    return None;
                }
                Some((basis_vec, basis_witness)) => {
                    vector ^= basis_vec.clone();
                    witness = symmetric_difference(&witness, basis_witness);
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

fn symmetric_difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut result: Vec<usize> = a.iter().copied().filter(|x| !b.contains(x)).collect();
    result.extend(b.iter().copied().filter(|x| !a.contains(x)));
    result.sort_unstable();
    result
}

/// Builds a parity bit-vector of length `width` from a sparse list of
/// non-negative exponent counts (one per factor-base prime) plus a sign
/// flag occupying bit 0.
pub fn parity_vector(is_negative: bool, exponents: &[u32], width: usize) -> BitVec {
    let mut v = bitvec![0; width];
    v.set(0, is_negative);
    for (i, &exp) in exponents.iter().enumerate() {
        v.set(i + 1, exp % 2 == 1);
    }
    v
}
