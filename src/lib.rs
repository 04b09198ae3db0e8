//! S.S0055 3GPP2 AKA algorithm set (f1..f5*) and a minimal USIM card state
//! machine, as used by an EAP-AKA peer.
//!
//! [`Functions`] is the stateless cryptographic core: given a pre-shared key
//! and a random challenge (plus sequence number and AMF for f1/f1*), it
//! computes MAC/RES/CK/IK/AK outputs built from a keyed-SHA-1 PRF and a
//! GF(2^160) polynomial whitening step. [`Card`] wraps a borrowed
//! `Functions` instance with per-subscriber state (the stored sequence
//! number) and exposes the two operations a network peer actually drives:
//! [`Card::get_quintuplet`] and [`Card::resync`].
//!
//! ```
//! use aka3gpp2::{Card, Config, FixedSqnSource, Functions, StaticKeyStore};
//!
//! let functions = Functions::with_keyed_sha1().unwrap();
//! let mut key_store = StaticKeyStore::new();
//! key_store.insert("alice@example.com", [0u8; 16]);
//! let sqn_source = FixedSqnSource([0u8; 6]);
//!
//! let mut card = Card::new(&functions, &key_store, &sqn_source, Config::default());
//! let rand = [0u8; 16];
//! let new_sqn = [0, 0, 0, 0, 0, 1];
//! let amf = [0u8; 2];
//! let ak = functions.f5(&[0u8; 16], &rand);
//! let mac = functions.f1(&[0u8; 16], &rand, &new_sqn, &amf);
//! let mut autn = [0u8; 16];
//! for i in 0..6 {
//!     autn[i] = new_sqn[i] ^ ak[i];
//! }
//! autn[6..8].copy_from_slice(&amf);
//! autn[8..].copy_from_slice(&mac);
//!
//! let (_ck, _ik, _res) = card.get_quintuplet("alice@example.com", &rand, &autn).unwrap();
//! ```

mod bytes;
mod card;
mod collaborators;
mod config;
mod constants;
mod error;
mod functions;
mod poly;
mod prf;

pub use {
    card::Card,
    collaborators::{FixedSqnSource, KeyStore, SqnSource, StaticKeyStore, WallClockSqnSource},
    config::Config,
    constants::{
        AK_LEN, AMF_LEN, AUTN_LEN, AUTS_LEN, CK_LEN, IK_LEN, K_LEN, MAC_LEN, RAND_LEN, RES_LEN,
        SQN_LEN,
    },
    error::AkaError,
    functions::Functions,
    prf::{Prf, Sha1Prf},
};
