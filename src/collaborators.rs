//! The three seams the source reaches into a process-wide registry for:
//! identity-to-key lookup, initial SQN seeding, and PRF backend selection
//! (the last of which is [`crate::prf::Prf`], not repeated here). This
//! crate passes them as explicit constructor dependencies instead.

use crate::constants::{K_LEN, SQN_LEN};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use zeroize::Zeroizing;

/// Looks up the long-term pre-shared key K for a subscriber identity.
///
/// Models the source's `get_k(identity) -> (K | not-found)` collaborator
/// callback. A real deployment backs this with an IMSI/key database; this
/// crate treats that database as out of scope.
pub trait KeyStore: Send + Sync {
    /// Returns `K` for `identity`, or `None` if no key is provisioned.
    fn get_k(&self, identity: &str) -> Option<Zeroizing<[u8; K_LEN]>>;
}

/// A simple in-memory `KeyStore`, suitable for tests and minimal
/// deployments. Not an identity database, just a lookup table.
#[derive(Debug, Default)]
pub struct StaticKeyStore(HashMap<String, [u8; K_LEN]>);

impl StaticKeyStore {
    /// An empty key store; every identity resolves to `KeyNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision `k` as the key for `identity`, replacing any prior value.
    pub fn insert(&mut self, identity: impl Into<String>, k: [u8; K_LEN]) -> &mut Self {
        self.0.insert(identity.into(), k);
        self
    }
}

impl KeyStore for StaticKeyStore {
    fn get_k(&self, identity: &str) -> Option<Zeroizing<[u8; K_LEN]>> {
        self.0.get(identity).copied().map(Zeroizing::new)
    }
}

/// Seeds a card's initial SQN. Models the source's
/// `get_sqn(offset) -> SQN` collaborator callback, which is opaque to the
/// core: it is typically derived from wall-clock time, but nothing in the
/// algorithm set depends on that.
pub trait SqnSource {
    /// Returns the initial SQN a freshly constructed card should store.
    /// `offset` lets a single identity's SQN stream be shifted, matching
    /// the source's signature; this crate's own implementations ignore it
    /// unless noted otherwise.
    fn get_sqn(&self, offset: i64) -> [u8; SQN_LEN];
}

/// Seeds SQN from the low 48 bits of the current Unix time in
/// milliseconds, plus `offset` milliseconds. This is the "typically derived
/// from wall-clock time" default mentioned in the source's collaborator
/// contract.
#[derive(Debug, Default)]
pub struct WallClockSqnSource;

impl SqnSource for WallClockSqnSource {
    fn get_sqn(&self, offset: i64) -> [u8; SQN_LEN] {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before the Unix epoch")
            .as_millis() as i64;
        let value = millis.saturating_add(offset).max(0) as u64;
        let be = value.to_be_bytes();
        let mut sqn = [0u8; SQN_LEN];
        sqn.copy_from_slice(&be[be.len() - SQN_LEN..]);
        sqn
    }
}

/// Seeds SQN with a fixed, caller-chosen value, useful for tests that need
/// a deterministic starting point.
#[derive(Debug, Clone, Copy)]
pub struct FixedSqnSource(pub [u8; SQN_LEN]);

impl SqnSource for FixedSqnSource {
    fn get_sqn(&self, _offset: i64) -> [u8; SQN_LEN] {
        self.0
    }
}
