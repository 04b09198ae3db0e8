//! Policy configuration for a [`crate::card::Card`].
//!
//! The algorithm core recognizes exactly one option; everything else about
//! how a host loads and merges its configuration (file format, environment
//! overrides, CLI flags) is a host concern, not this crate's.

use serde::{Deserialize, Serialize};

/// Card policy configuration.
///
/// A host typically loads this alongside its other settings (e.g. via the
/// `toml` crate, as exercised in this crate's own tests) and passes the
/// result into [`crate::card::Card::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// When `true`, `get_quintuplet` rejects a received SQN that is not
    /// strictly greater than the card's stored SQN. When `false`, SQN is
    /// still updated on success but never validated.
    #[serde(default)]
    pub seq_check: bool,
}

impl Default for Config {
    /// Matches S.S0055's build-time default: sequence checking off unless a
    /// deployment's compile-time policy says otherwise.
    fn default() -> Self {
        Self { seq_check: false }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_has_seq_check_disabled() {
        assert!(!Config::default().seq_check);
    }

    #[test]
    fn deserializes_from_toml_with_default() {
        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());

        let explicit: Config = toml::from_str("seq_check = true").unwrap();
        assert!(explicit.seq_check);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config { seq_check: true };
        let serialized = toml::to_string(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(cfg, parsed);
    }
}
