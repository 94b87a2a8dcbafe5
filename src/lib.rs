// file: src/lib.rs
// version: 3.0.0
// guid: 38afa5f0-f078-4b78-acd2-a62127b883da

//! # vCenter Server Appliance Deploy Agent
//!
//! Collects deployment parameters (flags, environment, answers file or
//! interactive prompts), renders the JSON template consumed by the appliance's
//! CLI installer, writes it to disk and runs `vcsa-deploy install` against it.
//!
//! Credentials are held in zeroize-on-drop buffers and only become plaintext
//! inside the serialized template.

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod logging;
pub mod prompt;
pub mod security;
pub mod utils;

pub use error::{DeployError, Result};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
