//! Named signing keys for test setup.
//!
//! Integration environments ship with well-known accounts (genesis, token,
//! governance, ...). Rather than burying those private keys in package-level
//! constants, tests construct a [Keyring] up front and pass it into setup —
//! the core never depends on process-wide state.

use crate::Error;
use mason_cryptography::PrivateKey;
use std::collections::BTreeMap;

/// An explicit mapping from role name to signing key.
#[derive(Clone, Debug, Default)]
pub struct Keyring {
    keys: BTreeMap<String, PrivateKey>,
}

impl Keyring {
    /// Creates an empty keyring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key under a role name, rejecting duplicates.
    pub fn register(&mut self, name: &str, key: PrivateKey) -> Result<(), Error> {
        if self.keys.contains_key(name) {
            return Err(Error::DuplicateKey(name.to_string()));
        }
        self.keys.insert(name.to_string(), key);
        Ok(())
    }

    /// Registers a key from its hex-encoded scalar.
    pub fn register_hex(&mut self, name: &str, encoded: &str) -> Result<(), Error> {
        let key = PrivateKey::from_hex(encoded)?;
        self.register(name, key)
    }

    /// Looks up a key by role name.
    pub fn get(&self, name: &str) -> Result<&PrivateKey, Error> {
        self.keys
            .get(name)
            .ok_or_else(|| Error::UnknownKey(name.to_string()))
    }

    /// Iterates over registered role names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the keyring is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "c9806898a0334916c860748880a541f093b579a9b1f32934d86c363c39800357";

    #[test]
    fn test_register_and_get() {
        let mut keyring = Keyring::new();
        keyring.register_hex("genesis", GENESIS).unwrap();
        keyring.register("koin", PrivateKey::from_seed(1)).unwrap();

        assert_eq!(keyring.len(), 2);
        assert_eq!(
            keyring.get("genesis").unwrap().public_key(),
            PrivateKey::from_hex(GENESIS).unwrap().public_key(),
        );
        assert_eq!(keyring.names().collect::<Vec<_>>(), vec!["genesis", "koin"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut keyring = Keyring::new();
        keyring.register("koin", PrivateKey::from_seed(1)).unwrap();
        assert!(matches!(
            keyring.register("koin", PrivateKey::from_seed(2)),
            Err(Error::DuplicateKey(_))
        ));
    }

    #[test]
    fn test_unknown_name() {
        let keyring = Keyring::new();
        assert!(matches!(
            keyring.get("governance"),
            Err(Error::UnknownKey(_))
        ));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let mut keyring = Keyring::new();
        assert!(keyring.register_hex("bad", "not-hex").is_err());
        assert!(keyring.is_empty());
    }
}
