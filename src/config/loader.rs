// file: src/config/loader.rs
// version: 3.0.0
// guid: 3fb4c2ab-d7ea-422d-93b9-f5b49e0be527

//! Answers file loading and environment variable substitution
//!
//! The file is parsed before substitution, so `${VAR}` is only expanded inside
//! string values and the substituted text is never read as YAML.

use super::PartialParams;
use crate::error::DeployError;
use crate::Result;
use regex::Regex;
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

/// Answers file loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load deployment answers from a YAML file
    pub fn load_answers<P: AsRef<Path>>(&self, path: P) -> Result<PartialParams> {
        let content = Zeroizing::new(fs::read_to_string(&path).map_err(|e| {
            DeployError::ConfigError(format!(
                "Failed to read answers file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?);

        let mut document: Value = serde_yaml::from_str(&content)?;
        if document.is_null() {
            document = Value::Mapping(Default::default());
        }
        self.expand_env_vars(&mut document)?;
        let answers: PartialParams = serde_yaml::from_value(document)?;

        debug!("Loaded answers file {}", path.as_ref().display());
        Ok(answers)
    }

    /// Expand environment variables in every string value of the document
    fn expand_env_vars(&self, document: &mut Value) -> Result<()> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            DeployError::ConfigError(format!("Invalid regex pattern: {}", e))
        })?;

        let mut missing_vars = Vec::new();
        self.expand_value(&re, document, &mut missing_vars);

        if !missing_vars.is_empty() {
            return Err(DeployError::ConfigError(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(())
    }

    fn expand_value(&self, re: &Regex, value: &mut Value, missing_vars: &mut Vec<String>) {
        match value {
            Value::String(text) => {
                if let Some(expanded) = self.expand_str(re, text, missing_vars) {
                    *text = expanded;
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    self.expand_value(re, item, missing_vars);
                }
            }
            Value::Mapping(map) => {
                for (_, item) in map.iter_mut() {
                    self.expand_value(re, item, missing_vars);
                }
            }
            Value::Tagged(tagged) => self.expand_value(re, &mut tagged.value, missing_vars),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    /// Substituted text, or `None` when `text` has no placeholder
    fn expand_str(&self, re: &Regex, text: &str, missing_vars: &mut Vec<String>) -> Option<String> {
        if !re.is_match(text) {
            return None;
        }

        let expanded = re.replace_all(text, |cap: &regex::Captures| {
            match self.env_vars.get(&cap[1]) {
                Some(value) => value.clone(),
                None => {
                    missing_vars.push(cap[1].to_string());
                    String::new()
                }
            }
        });
        Some(expanded.into_owned())
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn answers_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_env_var_expansion() {
        let mut loader = ConfigLoader::new();
        loader.set_env_var("TEST_VAR".to_string(), "test_value".to_string());

        let mut document: Value = serde_yaml::from_str("key: prefix-${TEST_VAR}").unwrap();
        loader.expand_env_vars(&mut document).unwrap();
        assert_eq!(document["key"].as_str(), Some("prefix-test_value"));
    }

    #[test]
    fn test_missing_env_var() {
        let loader = ConfigLoader::new();
        let mut document: Value =
            serde_yaml::from_str("key: ${VCSA_AGENT_SURELY_MISSING_VAR}").unwrap();

        let result = loader.expand_env_vars(&mut document);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("VCSA_AGENT_SURELY_MISSING_VAR"));
    }

    #[test]
    fn test_load_answers() -> Result<()> {
        let file = answers_file(
            r#"
esxi_host: esx01.lab.local
esxi_password: ${TEST_ESXI_PW}
datastore: datastore1
deployment_size: medium
network_mode: static
ip: 10.0.0.5
prefix: ${TEST_PREFIX}
gateway: 10.0.0.1
dns_servers: [8.8.8.8, "${TEST_DNS}"]
ssh_enable: ${TEST_SSH}
"#,
        );

        let mut loader = ConfigLoader::new();
        loader.set_env_var("TEST_ESXI_PW".to_string(), "FromEnv1!".to_string());
        loader.set_env_var("TEST_PREFIX".to_string(), "24".to_string());
        loader.set_env_var("TEST_DNS".to_string(), "8.8.4.4".to_string());
        loader.set_env_var("TEST_SSH".to_string(), "true".to_string());
        let answers = loader.load_answers(file.path())?;

        assert_eq!(answers.esxi_host.as_deref(), Some("esx01.lab.local"));
        assert_eq!(answers.deployment_size.as_deref(), Some("medium"));
        assert_eq!(answers.prefix.as_deref(), Some("24"));
        assert_eq!(answers.dns_servers.as_deref(), Some("8.8.8.8,8.8.4.4"));
        assert_eq!(answers.ssh_enable, Some(true));
        answers
            .esxi_password
            .unwrap()
            .expose(|plain| assert_eq!(plain, "FromEnv1!"));

        Ok(())
    }

    #[test]
    fn test_substituted_credentials_are_taken_verbatim() -> Result<()> {
        let file = answers_file(
            "esxi_password: ${TEST_ESXI_PW}\nroot_password: ${TEST_ROOT_PW}\nsso_password: ${TEST_SSO_PW}\n",
        );

        for value in ["Secret #1", "!VMware1", "*abc", "a: b", "{x}", "true", "24"] {
            let mut loader = ConfigLoader::new();
            loader.set_env_var("TEST_ESXI_PW".to_string(), value.to_string());
            loader.set_env_var("TEST_ROOT_PW".to_string(), value.to_string());
            loader.set_env_var("TEST_SSO_PW".to_string(), value.to_string());

            let answers = loader.load_answers(file.path())?;
            for secret in [answers.esxi_password, answers.root_password, answers.sso_password] {
                secret.unwrap().expose(|plain| assert_eq!(plain, value));
            }
        }

        Ok(())
    }

    #[test]
    fn test_keys_are_not_expanded() {
        let file = answers_file("${TEST_KEY}: value\n");

        let mut loader = ConfigLoader::new();
        loader.set_env_var("TEST_KEY".to_string(), "esxi_host".to_string());
        assert!(loader.load_answers(file.path()).is_err());
    }

    #[test]
    fn test_load_answers_missing_file() {
        let loader = ConfigLoader::new();
        let err = loader.load_answers("/nonexistent/answers.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read answers file"));
    }
}
