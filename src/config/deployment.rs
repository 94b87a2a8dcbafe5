// file: src/config/deployment.rs
// version: 1.0.0
// guid: 75e0489f-fb4f-4481-b161-e8d8774feb89

//! Installer JSON template schema

use super::{DeploymentSize, IpFamily, NetworkMode};
use crate::security::SecretString;
use serde::Serialize;

/// Top-level document consumed by `vcsa-deploy install`
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentConfig {
    /// Template schema version expected by the installer
    #[serde(rename = "__version")]
    pub version: String,
    #[serde(rename = "__comments")]
    pub comments: String,
    pub new_vcsa: NewVcsa,
    pub ceip: CeipConfig,
}

/// Appliance deployment block
#[derive(Debug, Clone, Serialize)]
pub struct NewVcsa {
    pub esxi: EsxiConfig,
    pub appliance: ApplianceConfig,
    pub network: ApplianceNetwork,
    pub os: OsConfig,
    pub sso: SsoConfig,
}

/// Target ESXi host and placement
#[derive(Debug, Clone, Serialize)]
pub struct EsxiConfig {
    pub hostname: String,
    pub username: String,
    pub password: SecretString,
    pub deployment_network: String,
    pub datastore: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplianceConfig {
    pub thin_disk_mode: bool,
    pub deployment_option: DeploymentSize,
    pub name: String,
}

/// Appliance network settings; the addressing fields only exist in static mode
#[derive(Debug, Clone, Serialize)]
pub struct ApplianceNetwork {
    pub ip_family: IpFamily,
    pub mode: NetworkMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OsConfig {
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntp_servers: Option<Vec<String>>,
    /// Set when no NTP server is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_tools_sync_mode: Option<String>,
    pub ssh_enable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SsoConfig {
    pub password: SecretString,
    pub domain_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CeipConfig {
    pub settings: CeipSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct CeipSettings {
    pub ceip_enabled: bool,
}

impl DeploymentConfig {
    /// Render the document as pretty JSON.
    ///
    /// The returned buffer holds plaintext credentials and is wiped on drop.
    pub fn to_json(&self) -> crate::Result<zeroize::Zeroizing<String>> {
        Ok(zeroize::Zeroizing::new(serde_json::to_string_pretty(self)?))
    }
}
