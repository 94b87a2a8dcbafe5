// file: src/utils/mod.rs
// version: 2.0.0
// guid: af6bca78-fd2e-435c-a9a0-2ec9ced4968a

//! Utility modules for system operations

pub mod system;

pub use system::SystemUtils;
