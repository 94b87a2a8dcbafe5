// file: src/logging/mod.rs
// version: 2.0.0
// guid: 9de20271-7140-4acc-98cf-8ba43e6d761b

//! Logging system for the appliance deployment wrapper

pub mod logger;

pub use logger::init_logger;
