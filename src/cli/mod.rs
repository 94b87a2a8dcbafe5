// file: src/cli/mod.rs
// version: 2.0.0
// guid: 15c7a92f-80d0-4612-a6e1-835595f69233

//! Command line interface for the appliance deployment wrapper

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
