// file: src/prompt/terminal.rs
// version: 1.0.0
// guid: 021f528c-c4cc-47ed-b531-95350bac9182

//! Interactive prompts on the controlling terminal

use super::{Field, Prompter};
use crate::security::SecretString;
use crate::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

/// dialoguer-backed prompter
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, field: &Field, default: Option<&str>, allow_empty: bool) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(field.label)
            .allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn password(&mut self, field: &Field) -> Result<SecretString> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(field.label)
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;
        Ok(SecretString::new(value))
    }

    fn select(&mut self, field: &Field, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(field.label)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
