// file: src/prompt/mod.rs
// version: 1.0.0
// guid: fb727c38-484d-43cf-93e7-45b92270985d

//! Parameter prompting
//!
//! [`Prompter`] is the seam between parameter collection and the terminal:
//! [`TerminalPrompter`] asks the operator, [`NonInteractive`] answers with
//! defaults or fails with the flag that should have been passed.

pub mod collector;
pub mod terminal;

pub use collector::ParamCollector;
pub use terminal::TerminalPrompter;

use crate::error::DeployError;
use crate::security::SecretString;
use crate::Result;

/// Describes one input for prompts and error messages
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Prompt text
    pub label: &'static str,
    /// Command-line flag that supplies the value
    pub flag: &'static str,
    /// Environment variable that supplies the value, if any
    pub env: Option<&'static str>,
}

impl Field {
    pub const fn new(label: &'static str, flag: &'static str) -> Self {
        Self {
            label,
            flag,
            env: None,
        }
    }

    pub const fn with_env(label: &'static str, flag: &'static str, env: &'static str) -> Self {
        Self {
            label,
            flag,
            env: Some(env),
        }
    }

    /// Error raised when the value was required but nobody supplied it
    pub fn missing(&self) -> DeployError {
        match self.env {
            Some(env) => DeployError::missing(format!("{} (or {}): {}", self.flag, env, self.label)),
            None => DeployError::missing(format!("{}: {}", self.flag, self.label)),
        }
    }
}

/// Source of answers for parameters not given up front
pub trait Prompter {
    /// Ask for a line of text; `allow_empty` marks optional inputs
    fn input(&mut self, field: &Field, default: Option<&str>, allow_empty: bool) -> Result<String>;

    /// Ask for a credential without echoing it
    fn password(&mut self, field: &Field) -> Result<SecretString>;

    /// Pick one of `items`, returning its index
    fn select(&mut self, field: &Field, items: &[&str], default: usize) -> Result<usize>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Whether an invalid answer should be asked again
    fn is_interactive(&self) -> bool;
}

/// Prompter for unattended runs: defaults are taken, everything else is an error
#[derive(Debug, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn input(&mut self, field: &Field, default: Option<&str>, allow_empty: bool) -> Result<String> {
        match default {
            Some(value) => Ok(value.to_string()),
            None if allow_empty => Ok(String::new()),
            None => Err(field.missing()),
        }
    }

    fn password(&mut self, field: &Field) -> Result<SecretString> {
        Err(field.missing())
    }

    fn select(&mut self, _field: &Field, _items: &[&str], default: usize) -> Result<usize> {
        Ok(default)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        Err(DeployError::prompt(format!(
            "Cannot ask '{}' in non-interactive mode; pass --yes",
            prompt
        )))
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
