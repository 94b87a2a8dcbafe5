// file: src/security/mod.rs
// version: 2.0.0
// guid: 4745bf39-261b-4c5d-83b3-8b66620abb0b

//! Credential handling and input validation

pub mod secret;
pub mod validation;

pub use secret::SecretString;
pub use validation::ValidationUtils;
