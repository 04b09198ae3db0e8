//! The error taxonomy raised by card operations and functions construction.

use thiserror::Error;

/// Everything that can go wrong in this crate, surfaced to the caller
/// verbatim; nothing here is retried internally, and nothing recovers
/// silently.
#[derive(Debug, Error)]
pub enum AkaError {
    /// No K is provisioned for the given identity.
    #[error("no key found for identity {identity:?}")]
    KeyNotFound {
        /// The identity the collaborator's `KeyStore` failed to resolve.
        identity: String,
    },

    /// The MAC carried in AUTN did not match the locally computed XMAC.
    #[error("received MAC does not match computed XMAC")]
    MacMismatch,

    /// `seq_check` is enabled and the received SQN was not strictly greater
    /// than the card's stored SQN.
    #[error("received sequence number is not greater than the stored one")]
    InvalidSequence,

    /// The keyed-SHA-1 PRF required by [`crate::functions::Functions`] was
    /// not available from the crypto backend.
    #[error("keyed SHA-1 PRF not available")]
    PrfUnavailable,
}
