//! The seven AKA functions (f1, f1*, f2, f3, f4, f5, f5*), built from the
//! keyed-SHA-1 PRF ([`crate::prf`]) and the whitening step
//! ([`crate::poly::whiten`]).
//!
//! Every function shares the same shape: fill a 64-byte payload with 0x5C,
//! XOR in the opcode, the family key, and the inputs at fixed offsets, run
//! it through the PRF and the whitening step, and take a fixed-size prefix
//! of the 20-byte result. The opcode is the only thing that tells two
//! otherwise-identical calls apart, which is why it alone is enough to
//! multiplex seven independent functions over one PRF.

use crate::{
    bytes::xor_into,
    constants::{
        AK_LEN, FMK, K_LEN, MAC_LEN, OP_F1, OP_F1STAR, OP_F2, OP_F3, OP_F4, OP_F5, OP_F5STAR,
        PAYLOAD_FILL, PAYLOAD_LEN, RAND_LEN, SQN_LEN,
    },
    error::AkaError,
    poly::whiten,
    prf::{Prf, Sha1Prf},
};
use std::cell::RefCell;

/// An instance of the AKA function set, holding a PRF dependency.
///
/// Calling any `fx` method rekeys the PRF (see [`Prf::digest`]); callers
/// never observe state from a previous call. The PRF is wrapped in a
/// [`RefCell`] rather than requiring `&mut self`, so that multiple
/// [`crate::card::Card`]s can share one `Functions` instance by shared
/// reference, matching the source, where a single functions object is
/// shared process-wide across every card. This crate is not `Sync`
/// (`RefCell` isn't); concurrent use from multiple threads must be
/// serialized by the caller, exactly as §5 requires.
pub struct Functions {
    prf: RefCell<Box<dyn Prf>>,
}

impl Functions {
    /// Build a `Functions` instance from a PRF backend, modeling the
    /// source's `create_prf(.., PRF_KEYED_SHA1) -> PRF | not-supported`
    /// call: `prf` is `None` when the backend doesn't offer the requested
    /// PRF, in which case construction fails with `AkaError::PrfUnavailable`
    /// rather than producing a `Functions` with no way to hash anything.
    pub fn new(prf: Option<Box<dyn Prf>>) -> Result<Self, AkaError> {
        let prf = prf.ok_or(AkaError::PrfUnavailable)?;
        Ok(Self {
            prf: RefCell::new(prf),
        })
    }

    /// Build a `Functions` instance backed by this crate's own keyed-SHA-1
    /// implementation ([`Sha1Prf`]), which always succeeds.
    pub fn with_keyed_sha1() -> Result<Self, AkaError> {
        Self::new(Some(Box::new(Sha1Prf::new())))
    }

    fn step3(&self, k: &[u8; K_LEN], payload: &[u8; PAYLOAD_LEN]) -> [u8; 20] {
        self.prf.borrow_mut().digest(k, payload)
    }

    /// `f1(K, RAND, SQN, AMF) -> MAC`.
    pub fn f1(
        &self,
        k: &[u8; K_LEN],
        rand: &[u8; RAND_LEN],
        sqn: &[u8; SQN_LEN],
        amf: &[u8; 2],
    ) -> [u8; MAC_LEN] {
        self.f1x(OP_F1, k, rand, sqn, amf)
    }

    /// `f1*(K, RAND, SQN, AMF) -> MACS`, used only during resync.
    pub fn f1star(
        &self,
        k: &[u8; K_LEN],
        rand: &[u8; RAND_LEN],
        sqn: &[u8; SQN_LEN],
        amf: &[u8; 2],
    ) -> [u8; MAC_LEN] {
        self.f1x(OP_F1STAR, k, rand, sqn, amf)
    }

    fn f1x(
        &self,
        opcode: u8,
        k: &[u8; K_LEN],
        rand: &[u8; RAND_LEN],
        sqn: &[u8; SQN_LEN],
        amf: &[u8; 2],
    ) -> [u8; MAC_LEN] {
        let mut payload = [PAYLOAD_FILL; PAYLOAD_LEN];
        payload[11] ^= opcode;
        xor_into(&mut payload, 12, &FMK);
        xor_into(&mut payload, 16, rand);
        xor_into(&mut payload, 34, sqn);
        xor_into(&mut payload, 42, amf);

        let h = whiten(&self.step3(k, &payload));
        let mut mac = [0u8; MAC_LEN];
        mac.copy_from_slice(&h[..MAC_LEN]);
        mac
    }

    /// `f2(K, RAND) -> RES`.
    pub fn f2(&self, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; 16] {
        self.fx(OP_F2, k, rand)
    }

    /// `f3(K, RAND) -> CK`.
    pub fn f3(&self, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; 16] {
        self.fx(OP_F3, k, rand)
    }

    /// `f4(K, RAND) -> IK`.
    pub fn f4(&self, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; 16] {
        self.fx(OP_F4, k, rand)
    }

    /// Two-round calculation shared by f2, f3, and f4. Each round reuses the
    /// same opcode and RAND but flips a single bit (`i`) at four offsets, so
    /// the two rounds' PRF outputs differ even though everything else about
    /// the payload is identical.
    fn fx(&self, opcode: u8, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; 16] {
        let mut out = [0u8; 16];
        for i in 0..2u8 {
            let mut payload = [PAYLOAD_FILL; PAYLOAD_LEN];
            payload[11] ^= opcode;
            xor_into(&mut payload, 12, &FMK);
            xor_into(&mut payload, 24, rand);
            payload[3] ^= i;
            payload[19] ^= i;
            payload[35] ^= i;
            payload[51] ^= i;

            let h = whiten(&self.step3(k, &payload));
            let start = i as usize * 8;
            out[start..start + 8].copy_from_slice(&h[..8]);
        }
        out
    }

    /// `f5(K, RAND) -> AK`.
    pub fn f5(&self, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; AK_LEN] {
        self.f5x(OP_F5, k, rand)
    }

    /// `f5*(K, RAND) -> AKS`, used only during resync.
    pub fn f5star(&self, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; AK_LEN] {
        self.f5x(OP_F5STAR, k, rand)
    }

    fn f5x(&self, opcode: u8, k: &[u8; K_LEN], rand: &[u8; RAND_LEN]) -> [u8; AK_LEN] {
        let mut payload = [PAYLOAD_FILL; PAYLOAD_LEN];
        payload[11] ^= opcode;
        xor_into(&mut payload, 12, &FMK);
        xor_into(&mut payload, 16, rand);

        let h = whiten(&self.step3(k, &payload));
        let mut ak = [0u8; AK_LEN];
        ak.copy_from_slice(&h[..AK_LEN]);
        ak
    }
}
