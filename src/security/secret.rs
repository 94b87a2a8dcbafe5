// file: src/security/secret.rs
// version: 1.0.0
// guid: 724e224c-09bd-4c90-beff-6445a76f0cfd

//! Credential holder that wipes its buffer on drop
//!
//! Plaintext is only reachable through [`SecretString::expose`], which lends the
//! value to a closure. Serialization writes the plaintext directly into the
//! output document; `Debug` never does.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string credential zeroized when dropped
#[derive(Clone, Default)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    /// Take ownership of a plaintext value
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    /// Lend the plaintext to `f` for the duration of the call
    pub fn expose<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self.0.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(***)")
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.expose(|plain| serializer.serialize_str(plain))
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString::new)
    }
}
