// file: src/security/validation.rs
// version: 2.0.0
// guid: 337252b5-2f30-4a5e-a94f-97c7191868c1

//! Input validation utilities

use crate::config::IpFamily;
use crate::error::DeployError;
use crate::Result;
use regex::Regex;
use std::net::IpAddr;

/// Utility functions for input validation
pub struct ValidationUtils;

impl ValidationUtils {
    /// Reject empty or whitespace-only values for a required field
    pub fn validate_required(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(DeployError::validation(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// Validate hostname / FQDN format
    pub fn validate_hostname(field: &str, hostname: &str) -> Result<()> {
        if hostname.is_empty() {
            return Err(DeployError::validation(format!("{} cannot be empty", field)));
        }

        if hostname.len() > 253 {
            return Err(DeployError::validation(format!(
                "{} cannot exceed 253 characters",
                field
            )));
        }

        if !hostname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(DeployError::validation(format!(
                "{} contains invalid characters: {}",
                field, hostname
            )));
        }

        if hostname
            .split('.')
            .any(|label| label.is_empty() || label.starts_with('-') || label.ends_with('-'))
        {
            return Err(DeployError::validation(format!(
                "{} has an empty label or a label starting/ending with a hyphen: {}",
                field, hostname
            )));
        }

        Ok(())
    }

    /// Validate a host given either as an IP address or a hostname
    pub fn validate_host(field: &str, host: &str) -> Result<()> {
        if host.parse::<IpAddr>().is_ok() {
            return Ok(());
        }
        Self::validate_hostname(field, host)
    }

    /// Validate IP address format and return the parsed address
    pub fn validate_ip_address(field: &str, ip: &str) -> Result<IpAddr> {
        ip.parse::<IpAddr>().map_err(|_| {
            DeployError::validation(format!("{}: invalid IP address format: {}", field, ip))
        })
    }

    /// Validate a subnet prefix length for the given address family
    pub fn validate_prefix(prefix: &str, family: IpFamily) -> Result<u8> {
        let max = match family {
            IpFamily::Ipv4 => 32,
            IpFamily::Ipv6 => 128,
        };

        let value = prefix.trim().parse::<u8>().map_err(|_| {
            DeployError::validation(format!("Subnet prefix must be a number: {}", prefix))
        })?;

        if value == 0 || value > max {
            return Err(DeployError::validation(format!(
                "Subnet prefix {} is out of range for {} (1-{})",
                value,
                family.as_str(),
                max
            )));
        }

        Ok(value)
    }

    /// Split a comma-delimited list, trimming each token.
    ///
    /// Every token must be non-empty: `"a,,b"` and `"a,"` are rejected rather than
    /// silently dropping the gap.
    pub fn parse_list(field: &str, raw: &str) -> Result<Vec<String>> {
        if raw.trim().is_empty() {
            return Err(DeployError::validation(format!("{} cannot be empty", field)));
        }

        raw.split(',')
            .map(|token| {
                let token = token.trim();
                if token.is_empty() {
                    Err(DeployError::validation(format!(
                        "{} contains an empty entry: '{}'",
                        field, raw
                    )))
                } else {
                    Ok(token.to_string())
                }
            })
            .collect()
    }

    /// Parse a comma-delimited list of IP addresses (DNS servers)
    pub fn parse_ip_list(field: &str, raw: &str) -> Result<Vec<String>> {
        let entries = Self::parse_list(field, raw)?;
        for entry in &entries {
            Self::validate_ip_address(field, entry)?;
        }
        Ok(entries)
    }

    /// Parse a comma-delimited list of hosts (NTP servers)
    pub fn parse_host_list(field: &str, raw: &str) -> Result<Vec<String>> {
        let entries = Self::parse_list(field, raw)?;
        for entry in &entries {
            Self::validate_host(field, entry)?;
        }
        Ok(entries)
    }

    /// Validate the template schema version tag (dotted numeric, e.g. 2.13.0)
    pub fn validate_schema_version(version: &str) -> Result<()> {
        let re = Regex::new(r"^\d+\.\d+\.\d+$")
            .map_err(|e| DeployError::config(format!("Invalid regex pattern: {}", e)))?;

        if !re.is_match(version) {
            return Err(DeployError::validation(format!(
                "Template version must look like N.N.N, got '{}'",
                version
            )));
        }
        Ok(())
    }
}
