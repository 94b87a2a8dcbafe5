// file: src/config/mod.rs
// version: 2.0.0
// guid: afe8f763-2a96-4f26-81b5-6089bb83b943

//! Configuration module for the appliance deployment wrapper
//!
//! Holds the collected deployment parameters, the installer template schema and
//! the builder that turns one into the other, plus answers-file loading.

pub mod builder;
pub mod deployment;
pub mod loader;
pub mod params;

pub use builder::ConfigBuilder;
pub use deployment::DeploymentConfig;
pub use params::{DeploymentParams, DeploymentToggles, NetworkParams, PartialParams};

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Template schema version written when none is configured
pub const DEFAULT_SCHEMA_VERSION: &str = "2.13.0";

/// SSO domain written when none is configured
pub const DEFAULT_SSO_DOMAIN: &str = "vsphere.local";

/// ESXi login used when none is configured
pub const DEFAULT_ESXI_USERNAME: &str = "root";

/// Appliance sizing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentSize {
    Tiny,
    Small,
    Medium,
    Large,
}

impl DeploymentSize {
    pub const ALL: [DeploymentSize; 4] = [
        DeploymentSize::Tiny,
        DeploymentSize::Small,
        DeploymentSize::Medium,
        DeploymentSize::Large,
    ];

    /// Get the size as the installer spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentSize::Tiny => "tiny",
            DeploymentSize::Small => "small",
            DeploymentSize::Medium => "medium",
            DeploymentSize::Large => "large",
        }
    }
}

impl std::str::FromStr for DeploymentSize {
    type Err = crate::error::DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(DeploymentSize::Tiny),
            "small" => Ok(DeploymentSize::Small),
            "medium" => Ok(DeploymentSize::Medium),
            "large" => Ok(DeploymentSize::Large),
            _ => Err(crate::error::DeployError::ValidationError(format!(
                "Unknown deployment size: {} (expected tiny, small, medium or large)",
                s
            ))),
        }
    }
}

/// Appliance network addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    Static,
    Dhcp,
}

impl NetworkMode {
    pub const ALL: [NetworkMode; 2] = [NetworkMode::Static, NetworkMode::Dhcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::Static => "static",
            NetworkMode::Dhcp => "dhcp",
        }
    }
}

impl std::str::FromStr for NetworkMode {
    type Err = crate::error::DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(NetworkMode::Static),
            "dhcp" => Ok(NetworkMode::Dhcp),
            _ => Err(crate::error::DeployError::ValidationError(format!(
                "Unknown network mode: {} (expected static or dhcp)",
                s
            ))),
        }
    }
}

/// Address family of the appliance network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpFamily {
    Ipv4,
    Ipv6,
}

impl IpFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpFamily::Ipv4 => "ipv4",
            IpFamily::Ipv6 => "ipv6",
        }
    }
}

impl From<IpAddr> for IpFamily {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => IpFamily::Ipv4,
            IpAddr::V6(_) => IpFamily::Ipv6,
        }
    }
}
