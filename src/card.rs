//! The USIM-side state machine: `get_quintuplet` and `resync`.
//!
//! A `Card` owns nothing but a stored sequence number and a policy flag; all
//! cryptography is delegated to a borrowed [`Functions`] instance, which a
//! deployment typically shares across every card it holds (see
//! [`Functions`]'s own docs on why that's safe).

use crate::{
    collaborators::{KeyStore, SqnSource},
    config::Config,
    constants::{AK_LEN, AMF_LEN, AUTN_LEN, AUTS_LEN, MAC_LEN, RAND_LEN, SQN_LEN},
    error::AkaError,
    functions::Functions,
};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// A single subscriber's authentication state.
///
/// `'f` ties the card's lifetime to the [`Functions`] instance it borrows;
/// the card itself holds no cryptographic state beyond the stored SQN, so
/// constructing many cards against one shared `Functions` is the expected
/// deployment shape, not a special case.
pub struct Card<'f> {
    functions: &'f Functions,
    key_store: &'f dyn KeyStore,
    config: Config,
    stored_sqn: [u8; SQN_LEN],
}

impl<'f> Card<'f> {
    /// Construct a card, seeding its initial stored SQN from `sqn_source`.
    pub fn new(
        functions: &'f Functions,
        key_store: &'f dyn KeyStore,
        sqn_source: &dyn SqnSource,
        config: Config,
    ) -> Self {
        Self {
            functions,
            key_store,
            config,
            stored_sqn: sqn_source.get_sqn(0),
        }
    }

    /// The card's currently stored sequence number.
    pub fn stored_sqn(&self) -> [u8; SQN_LEN] {
        self.stored_sqn
    }

    /// Verify `AUTN` against `RAND` and, on success, advance the stored SQN
    /// and return `(CK, IK, RES)`.
    ///
    /// `AUTN` is `SQN⊕AK(6) ‖ AMF(2) ‖ MAC(8)`.
    pub fn get_quintuplet(
        &mut self,
        identity: &str,
        rand: &[u8; RAND_LEN],
        autn: &[u8; AUTN_LEN],
    ) -> Result<([u8; 16], [u8; 16], [u8; 16]), AkaError> {
        let k = self.key_store.get_k(identity).ok_or_else(|| {
            tracing::warn!(identity, "no key provisioned for identity");
            AkaError::KeyNotFound {
                identity: identity.to_string(),
            }
        })?;

        let sqn_xor_ak: [u8; SQN_LEN] = autn[0..SQN_LEN].try_into().expect("slice is SQN_LEN");
        let amf: [u8; AMF_LEN] = autn[SQN_LEN..SQN_LEN + AMF_LEN]
            .try_into()
            .expect("slice is AMF_LEN");
        let mac: [u8; MAC_LEN] = autn[SQN_LEN + AMF_LEN..]
            .try_into()
            .expect("slice is MAC_LEN");

        let ak = Zeroizing::new(self.functions.f5(&k, rand));
        let mut sqn = Zeroizing::new([0u8; SQN_LEN]);
        xor_fixed(&mut sqn, &sqn_xor_ak, &ak);
        tracing::trace!(ak = ?ak.as_slice(), sqn = ?sqn.as_slice(), "recovered AK and SQN");

        let xmac = self.functions.f1(&k, rand, &sqn, &amf);
        tracing::trace!(xmac = ?xmac, "computed XMAC");
        if mac[..].ct_eq(&xmac[..]).unwrap_u8() == 0 {
            tracing::warn!(identity, "received MAC does not match computed XMAC");
            return Err(AkaError::MacMismatch);
        }

        if self.config.seq_check && !sqn_is_greater(&sqn, &self.stored_sqn) {
            tracing::warn!(
                identity,
                "received sequence number is not greater than stored"
            );
            return Err(AkaError::InvalidSequence);
        }

        self.stored_sqn = *sqn;

        let res = self.functions.f2(&k, rand);
        let ck = self.functions.f3(&k, rand);
        let ik = self.functions.f4(&k, rand);
        Ok((ck, ik, res))
    }

    /// Produce a resynchronization token `AUTS` for `RAND`, without
    /// mutating the stored SQN.
    ///
    /// `AUTS` is `SQN⊕AKS(6) ‖ MACS(8)`.
    pub fn resync(
        &self,
        identity: &str,
        rand: &[u8; RAND_LEN],
    ) -> Result<[u8; AUTS_LEN], AkaError> {
        let k = self.key_store.get_k(identity).ok_or_else(|| {
            tracing::warn!(identity, "no key provisioned for identity");
            AkaError::KeyNotFound {
                identity: identity.to_string(),
            }
        })?;

        let amf = [0u8; AMF_LEN];
        let aks: [u8; AK_LEN] = self.functions.f5star(&k, rand);
        let macs = self.functions.f1star(&k, rand, &self.stored_sqn, &amf);

        let mut auts = [0u8; AUTS_LEN];
        xor_fixed(
            (&mut auts[0..SQN_LEN]).try_into().expect("slice is SQN_LEN"),
            &self.stored_sqn,
            &aks,
        );
        auts[SQN_LEN..].copy_from_slice(&macs);
        Ok(auts)
    }
}

fn xor_fixed<const N: usize>(dst: &mut [u8; N], a: &[u8; N], b: &[u8; N]) {
    for i in 0..N {
        dst[i] = a[i] ^ b[i];
    }
}

/// True when `received`, as a big-endian unsigned integer, is strictly
/// greater than `stored`. Equality is rejected, matching the source's
/// `memcmp >= 0` sequence check (§4.4, step 6).
fn sqn_is_greater(received: &[u8; SQN_LEN], stored: &[u8; SQN_LEN]) -> bool {
    received > stored
}
