//! Polynomial arithmetic over GF(2)[T], and the whitening step built from it.
//!
//! Every `fx` output passes through a step the source calls `step4`: the
//! 20-byte PRF output is reinterpreted as a polynomial over GF(2) and run
//! through `(a · x + b) mod g`, where `a`, `b`, `g` are the fixed constants
//! in [`crate::constants`]. This module implements the three polynomial
//! primitives that operation needs, plus `whiten` itself.
//!
//! Values here never exceed 320 bits (the product of two 160-bit
//! polynomials), so a big-endian `Vec<u8>` byte buffer is used in place of
//! an arbitrary-precision integer library; the source depends on GMP
//! (`mpz_t`) for this, which is unnecessary given the fixed, small sizes
//! involved.

use crate::constants::HASH_LEN;
use docext::docext;

/// A polynomial over GF(2), represented as a big-endian byte buffer.
///
/// Bit `i` (the coefficient of `T^i`) is the bit at position `i` counting
/// from the *end* of the buffer: the last byte holds `T^0..T^7`, the
/// second-to-last holds `T^8..T^15`, and so on. The buffer may carry
/// leading zero bytes; callers should not assume it is canonical.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PolyBuf(Vec<u8>);

impl PolyBuf {
    fn zero() -> Self {
        Self(vec![0])
    }

    fn with_capacity_bits(bits: usize) -> Self {
        Self(vec![0u8; bits.div_ceil(8).max(1)])
    }

    fn bit(&self, i: usize) -> bool {
        let total_bits = self.0.len() * 8;
        if i >= total_bits {
            return false;
        }
        let byte_idx = self.0.len() - 1 - i / 8;
        (self.0[byte_idx] >> (i % 8)) & 1 == 1
    }

    fn set_bit(&mut self, i: usize) {
        let needed_bytes = i / 8 + 1;
        self.grow_to_bytes(needed_bytes);
        let byte_idx = self.0.len() - 1 - i / 8;
        self.0[byte_idx] |= 1 << (i % 8);
    }

    /// Highest `i` such that `T^i` has a nonzero coefficient, or `None` for
    /// the zero polynomial.
    fn degree(&self) -> Option<usize> {
        (0..self.0.len() * 8).rev().find(|&i| self.bit(i))
    }

    fn grow_to_bytes(&mut self, new_len: usize) {
        if new_len <= self.0.len() {
            return;
        }
        let mut grown = vec![0u8; new_len];
        let offset = new_len - self.0.len();
        grown[offset..].copy_from_slice(&self.0);
        self.0 = grown;
    }

    fn xor_assign(&mut self, other: &PolyBuf) {
        self.grow_to_bytes(other.0.len());
        let offset = self.0.len() - other.0.len();
        for (d, s) in self.0[offset..].iter_mut().zip(other.0.iter()) {
            *d ^= s;
        }
    }

    /// `self * T^n`.
    fn shift_left(&self, n: usize) -> PolyBuf {
        let Some(deg) = self.degree() else {
            return PolyBuf::zero();
        };
        let mut out = PolyBuf::with_capacity_bits(deg + n + 1);
        for i in 0..=deg {
            if self.bit(i) {
                out.set_bit(i + n);
            }
        }
        out
    }
}

/// `a + b`, i.e. bitwise XOR. Addition and multiplication over GF(2) treat
/// "+" and "-" as the same operation, since every element is its own
/// additive inverse.
pub fn add_poly(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut pa = PolyBuf(a.to_vec());
    pa.xor_assign(&PolyBuf(b.to_vec()));
    pa.0
}

/// `a * b`.
///
/// Writing $a = \sum_i a_i T^i$ over $GF(2)$, multiplication distributes as
///
/// $$
/// a \cdot b = \left( \sum_i a_i T^i \right) b = \sum_{i : a_i = 1} b \cdot T^i
/// $$
///
/// and $b \cdot T^i$ is just $b$ shifted left by $i$ bits. So for every set
/// bit $i$ of $a$, XOR $b$ shifted left by $i$ bits into the accumulator —
/// the standard shift-and-add (here shift-and-xor) polynomial
/// multiplication, mirroring the source's `mpz_scan1` loop over `a`'s set
/// bits.
#[docext]
pub fn mul_poly(a: &[u8], b: &[u8]) -> Vec<u8> {
    let pa = PolyBuf(a.to_vec());
    let pb = PolyBuf(b.to_vec());
    let (Some(da), Some(_)) = (pa.degree(), pb.degree()) else {
        return vec![0];
    };
    let mut acc = PolyBuf::zero();
    for i in 0..=da {
        if pa.bit(i) {
            acc.xor_assign(&pb.shift_left(i));
        }
    }
    acc.0
}

/// `a mod g`, by classical polynomial long division.
///
/// While `deg(a) >= deg(g)`, align `g`'s top bit to `a`'s top bit by a left
/// shift and XOR it in, which cancels `a`'s current leading term; repeat
/// until `deg(a) < deg(g)`. The result is the residue.
///
/// # Panics
///
/// Panics if `g` is the zero polynomial; `g` is always one of the fixed
/// whitening constants in this crate, never caller-supplied.
pub fn mod_poly(a: &[u8], g: &[u8]) -> Vec<u8> {
    let pg = PolyBuf(g.to_vec());
    let dg = pg.degree().expect("reduction polynomial must be nonzero");
    let mut r = PolyBuf(a.to_vec());
    while let Some(dr) = r.degree() {
        if dr < dg {
            break;
        }
        r.xor_assign(&pg.shift_left(dr - dg));
    }
    r.0
}

/// Copy the low `N` bytes of `p`'s value into a fixed-size big-endian
/// buffer, left-padding with zeros if `p` is shorter than `N` bytes.
fn export_fixed<const N: usize>(p: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let copy_len = p.len().min(N);
    out[N - copy_len..].copy_from_slice(&p[p.len() - copy_len..]);
    out
}

/// `step4`: the whitening transform `x ← ((a · x) + b) mod g`, applied to a
/// 20-byte PRF output block. `a`, `b`, `g` are the fixed S.S0055 constants;
/// the output is always exactly 20 bytes, zero-padded on the left.
pub fn whiten(x: &[u8; HASH_LEN]) -> [u8; HASH_LEN] {
    use crate::constants::{WHITEN_A, WHITEN_B, WHITEN_G};

    let product = mul_poly(&WHITEN_A, x);
    let sum = add_poly(&product, &WHITEN_B);
    let residue = mod_poly(&sum, &WHITEN_G);
    export_fixed(&residue)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_is_commutative_and_associative() {
        let a = [0x12, 0x34];
        let b = [0xAB, 0xCD];
        let c = [0x01, 0x02];
        assert_eq!(add_poly(&a, &b), add_poly(&b, &a));
        assert_eq!(
            add_poly(&add_poly(&a, &b), &c),
            add_poly(&a, &add_poly(&b, &c))
        );
    }

    #[test]
    fn add_of_equal_operands_is_zero() {
        let a = [0x9d, 0xe9, 0xc9, 0xc8];
        assert!(add_poly(&a, &a).iter().all(|&b| b == 0));
    }

    #[test]
    fn mul_is_commutative() {
        let a = [0x00, 0x05];
        let b = [0x00, 0x03];
        assert_eq!(mul_poly(&a, &b), mul_poly(&b, &a));
    }

    #[test]
    fn mul_by_zero_is_zero() {
        let a = [0xFF, 0xFF];
        let zero = [0x00, 0x00];
        assert!(mul_poly(&a, &zero).iter().all(|&b| b == 0));
    }

    #[test]
    fn mul_by_one_is_identity() {
        // T^0 = 0x01 as a single-byte polynomial.
        let a = [0x9d, 0xe9, 0xc9, 0xc8];
        let one = [0x01];
        let pa = PolyBuf(a.to_vec());
        let product = PolyBuf(mul_poly(&a, &one));
        assert_eq!(pa.degree(), product.degree());
        assert_eq!(export_fixed::<4>(&mul_poly(&a, &one)), a);
    }

    #[test]
    fn mod_reduces_below_degree_of_modulus() {
        use crate::constants::WHITEN_G;
        let pg = PolyBuf(WHITEN_G.to_vec());
        let dg = pg.degree().unwrap();

        let x = [0xFFu8; 20];
        let residue = mod_poly(&x, &WHITEN_G);
        let pr = PolyBuf(residue);
        assert!(pr.degree().map_or(true, |d| d < dg));
    }

    #[test]
    fn mod_of_value_already_below_degree_is_identity() {
        use crate::constants::WHITEN_G;
        let small = [0x00, 0x2d];
        assert_eq!(mod_poly(&small, &WHITEN_G), small);
    }

    #[test]
    fn whiten_always_returns_twenty_bytes() {
        let out = whiten(&[0u8; 20]);
        assert_eq!(out.len(), 20);
        let out2 = whiten(&[0xFFu8; 20]);
        assert_eq!(out2.len(), 20);
        // Deterministic.
        assert_eq!(whiten(&[0xFFu8; 20]), out2);
    }

    #[test]
    fn whiten_is_sensitive_to_input() {
        let a = whiten(&[0u8; 20]);
        let mut flipped = [0u8; 20];
        flipped[19] = 0x01;
        let b = whiten(&flipped);
        assert_ne!(a, b);
    }
}
