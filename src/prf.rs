//! The keyed-SHA-1 pseudo-random function ("`step3`" in the source).
//!
//! This is not HMAC-SHA-1. The PRF identifier in the source,
//! `PRF_KEYED_SHA1`, names a simpler construction: SHA-1's compression
//! function is run exactly once over a single 64-byte block. No
//! Merkle-Damgard length padding is needed, since every `fx` payload is
//! already block-sized. It's seeded with a non-standard initial state derived
//! from the 16-byte key K instead of SHA-1's fixed IV
//! (`0x67452301 0xEFCDAB89 0x98BADCFE 0x10325476 0xC3D2E1F0`). K is decomposed
//! big-endian into four 32-bit words occupying state words 0..3; the fifth
//! word, uncovered by K's 16 bytes, is zero.

use crate::constants::{HASH_LEN, K_LEN, PAYLOAD_LEN};
use zeroize::Zeroize;

/// A keyed pseudo-random function producing a 20-byte digest.
///
/// This is the trait seam modeling the source's `create_prf(..,
/// PRF_KEYED_SHA1)` backend selection: [`crate::functions::Functions`]
/// depends only on this trait, not on a concrete hash implementation, so a
/// host application that already has its own crypto backend can plug it in
/// instead of [`Sha1Prf`].
pub trait Prf: Send {
    /// Rekey the PRF with `key` and return the 20-byte digest of `payload`.
    /// Must support being called repeatedly with different keys; no PRF
    /// instance may leak state from a previous call into the next digest.
    fn digest(&mut self, key: &[u8; K_LEN], payload: &[u8; PAYLOAD_LEN]) -> [u8; HASH_LEN];
}

/// The reference `Prf` implementation: keyed SHA-1 as described above.
#[derive(Debug, Default)]
pub struct Sha1Prf;

impl Sha1Prf {
    pub fn new() -> Self {
        Self
    }
}

impl Prf for Sha1Prf {
    fn digest(&mut self, key: &[u8; K_LEN], payload: &[u8; PAYLOAD_LEN]) -> [u8; HASH_LEN] {
        let mut state = keyed_iv(key);
        let result = export_be(compress(state, payload));
        state.zeroize();
        result
    }
}

/// Decompose `key` big-endian into the first four SHA-1 state words,
/// leaving the fifth word, uncovered by K's 16 bytes, zero.
fn keyed_iv(key: &[u8; K_LEN]) -> [u32; 5] {
    let mut iv = [0u32; 5];
    for (word, chunk) in iv.iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_be_bytes(chunk.try_into().expect("chunk is 4 bytes"));
    }
    iv
}

/// One SHA-1 compression round over a single 64-byte block, seeded with
/// `state` instead of the standard IV. The feed-forward addition of `state`
/// into the round output at the end is the Davies–Meyer step that SHA-1 (and
/// every Merkle–Damgård hash) applies after each block, kept here because
/// it's intrinsic to the compression function, not something "keying"
/// bypasses.
fn compress(state: [u32; 5], block: &[u8; PAYLOAD_LEN]) -> [u32; 5] {
    let mut w = [0u32; 80];
    for (word, chunk) in w.iter_mut().take(16).zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes(chunk.try_into().expect("chunk is 4 bytes"));
    }
    for t in 16..80 {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = state;
    for (t, &wt) in w.iter().enumerate() {
        let (f, k) = match t {
            0..=19 => ((b & c) | (!b & d), 0x5A827999u32),
            20..=39 => (b ^ c ^ d, 0x6ED9EBA1),
            40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1BBCDC),
            _ => (b ^ c ^ d, 0xCA62C1D6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(wt);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    w.zeroize();
    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
    ]
}

fn export_be(state: [u32; 5]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let key = [0u8; K_LEN];
        let payload = [0u8; PAYLOAD_LEN];
        let mut prf = Sha1Prf::new();
        let h1 = prf.digest(&key, &payload);
        let h2 = prf.digest(&key, &payload);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), HASH_LEN);
    }

    #[test]
    fn digest_depends_on_key() {
        let mut prf = Sha1Prf::new();
        let payload = [0x5Cu8; PAYLOAD_LEN];
        let h_zero_key = prf.digest(&[0u8; K_LEN], &payload);
        let mut other_key = [0u8; K_LEN];
        other_key[0] = 0x01;
        let h_other_key = prf.digest(&other_key, &payload);
        assert_ne!(h_zero_key, h_other_key);
    }

    #[test]
    fn digest_depends_on_payload() {
        let mut prf = Sha1Prf::new();
        let key = [0u8; K_LEN];
        let h1 = prf.digest(&key, &[0u8; PAYLOAD_LEN]);
        let mut payload2 = [0u8; PAYLOAD_LEN];
        payload2[63] = 0x01;
        let h2 = prf.digest(&key, &payload2);
        assert_ne!(h1, h2);
    }

    #[test]
    fn rekeying_does_not_leak_previous_key() {
        // The same Prf instance, reused with two different keys over the same
        // payload, must behave exactly as two fresh instances would.
        let payload = [0xAAu8; PAYLOAD_LEN];
        let mut reused = Sha1Prf::new();
        let _ = reused.digest(&[0xFFu8; K_LEN], &payload);
        let second = reused.digest(&[0x00u8; K_LEN], &payload);

        let mut fresh = Sha1Prf::new();
        let expected = fresh.digest(&[0x00u8; K_LEN], &payload);
        assert_eq!(second, expected);
    }
}
