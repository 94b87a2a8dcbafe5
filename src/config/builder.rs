// file: src/config/builder.rs
// version: 1.0.0
// guid: 452b694b-3aa1-47dd-8b0b-de3691d6fcfd

//! Shapes collected parameters into the installer template and writes it out

use super::deployment::{
    ApplianceConfig, ApplianceNetwork, CeipConfig, CeipSettings, DeploymentConfig, EsxiConfig,
    NewVcsa, OsConfig, SsoConfig,
};
use super::{DeploymentParams, NetworkParams};
use crate::security::ValidationUtils;
use crate::Result;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Sync mode the installer expects when no NTP server is given
const SYNC_WITH_HOST: &str = "SYNC_WITH_HOST";

/// Builds [`DeploymentConfig`] documents from resolved parameters
pub struct ConfigBuilder {
    comments: String,
}

impl ConfigBuilder {
    /// Create a builder stamping documents with the tool version and current time
    pub fn new() -> Self {
        Self {
            comments: format!(
                "Generated by {} {} on {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ),
        }
    }

    /// Create a builder with a fixed provenance comment
    pub fn with_comments(comments: impl Into<String>) -> Self {
        Self {
            comments: comments.into(),
        }
    }

    /// Build the installer document
    pub fn build(&self, params: &DeploymentParams) -> Result<DeploymentConfig> {
        ValidationUtils::validate_schema_version(&params.schema_version)?;

        info!(
            "Building {} deployment template for appliance '{}'",
            params.deployment_size.as_str(),
            params.appliance_name
        );

        let network = match &params.network {
            NetworkParams::Static {
                ip,
                prefix,
                gateway,
                dns_servers,
            } => ApplianceNetwork {
                ip_family: params.network.ip_family()?,
                mode: params.network.mode(),
                system_name: params.fqdn.clone(),
                ip: Some(ip.clone()),
                prefix: Some(prefix.clone()),
                gateway: Some(gateway.clone()),
                dns_servers: Some(dns_servers.clone()),
            },
            NetworkParams::Dhcp => ApplianceNetwork {
                ip_family: params.network.ip_family()?,
                mode: params.network.mode(),
                system_name: params.fqdn.clone(),
                ip: None,
                prefix: None,
                gateway: None,
                dns_servers: None,
            },
        };

        let (ntp_servers, time_tools_sync_mode) = if params.ntp_servers.is_empty() {
            debug!("No NTP servers given, syncing appliance time with host");
            (None, Some(SYNC_WITH_HOST.to_string()))
        } else {
            (Some(params.ntp_servers.clone()), None)
        };

        Ok(DeploymentConfig {
            version: params.schema_version.clone(),
            comments: self.comments.clone(),
            new_vcsa: NewVcsa {
                esxi: EsxiConfig {
                    hostname: params.esxi_host.clone(),
                    username: params.esxi_username.clone(),
                    password: params.esxi_password.clone(),
                    deployment_network: params.network_name.clone(),
                    datastore: params.datastore.clone(),
                },
                appliance: ApplianceConfig {
                    thin_disk_mode: params.toggles.thin_disk_mode,
                    deployment_option: params.deployment_size,
                    name: params.appliance_name.clone(),
                },
                network,
                os: OsConfig {
                    password: params.root_password.clone(),
                    ntp_servers,
                    time_tools_sync_mode,
                    ssh_enable: params.toggles.ssh_enable,
                },
                sso: SsoConfig {
                    password: params.effective_sso_password().clone(),
                    domain_name: params.sso_domain.clone(),
                },
            },
            ceip: CeipConfig {
                settings: CeipSettings {
                    ceip_enabled: params.toggles.ceip_enabled,
                },
            },
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the document as pretty JSON, creating parent directories.
///
/// On Unix a new file is created owner read/write only, and an existing file is
/// restricted before any content is written, since it carries credentials.
pub async fn write_config(config: &DeploymentConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = config.to_json()?;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
    }

    file.write_all(json.as_bytes()).await?;
    file.flush().await?;

    info!("Deployment template written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::params::tests::static_params;
    use crate::config::{DeploymentToggles, IpFamily, NetworkMode};
    use serde_json::{json, Value};

    fn build_value(params: &DeploymentParams) -> Value {
        let config = ConfigBuilder::with_comments("test").build(params).unwrap();
        serde_json::from_str(&config.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_static_network_block() {
        let doc = build_value(&static_params());

        assert_eq!(
            doc["new_vcsa"]["network"],
            json!({
                "ip_family": "ipv4",
                "mode": "static",
                "system_name": "vcsa01.lab.local",
                "ip": "10.0.0.5",
                "prefix": "24",
                "gateway": "10.0.0.1",
                "dns_servers": ["8.8.8.8", "8.8.4.4"]
            })
        );
    }

    #[test]
    fn test_full_document_paths() {
        let doc = build_value(&static_params());

        assert_eq!(doc["__version"], "2.13.0");
        assert_eq!(doc["__comments"], "test");
        assert_eq!(doc["new_vcsa"]["esxi"]["hostname"], "esx01.lab.local");
        assert_eq!(doc["new_vcsa"]["esxi"]["username"], "root");
        assert_eq!(doc["new_vcsa"]["esxi"]["password"], "EsxiPass1!");
        assert_eq!(doc["new_vcsa"]["esxi"]["deployment_network"], "VM Network");
        assert_eq!(doc["new_vcsa"]["esxi"]["datastore"], "datastore1");
        assert_eq!(doc["new_vcsa"]["appliance"]["thin_disk_mode"], true);
        assert_eq!(doc["new_vcsa"]["appliance"]["deployment_option"], "medium");
        assert_eq!(doc["new_vcsa"]["appliance"]["name"], "vcsa01");
        assert_eq!(doc["new_vcsa"]["os"]["password"], "VMware1!");
        assert_eq!(doc["new_vcsa"]["os"]["ntp_servers"], json!(["pool.ntp.org"]));
        assert!(doc["new_vcsa"]["os"].get("time_tools_sync_mode").is_none());
        assert_eq!(doc["new_vcsa"]["os"]["ssh_enable"], false);
        assert_eq!(doc["new_vcsa"]["sso"]["password"], "VMware1!");
        assert_eq!(doc["new_vcsa"]["sso"]["domain_name"], "vsphere.local");
        assert_eq!(doc["ceip"]["settings"]["ceip_enabled"], false);
    }

    #[test]
    fn test_dhcp_omits_static_fields() {
        let mut params = static_params();
        params.network = NetworkParams::Dhcp;
        params.fqdn = None;

        let doc = build_value(&params);
        assert_eq!(
            doc["new_vcsa"]["network"],
            json!({ "ip_family": "ipv4", "mode": "dhcp" })
        );
    }

    #[test]
    fn test_no_ntp_syncs_with_host() {
        let mut params = static_params();
        params.ntp_servers.clear();

        let doc = build_value(&params);
        assert!(doc["new_vcsa"]["os"].get("ntp_servers").is_none());
        assert_eq!(doc["new_vcsa"]["os"]["time_tools_sync_mode"], "SYNC_WITH_HOST");
    }

    #[test]
    fn test_toggles_flow_into_document() {
        let mut params = static_params();
        params.toggles = DeploymentToggles {
            ceip_enabled: true,
            thin_disk_mode: false,
            ssh_enable: true,
        };

        let doc = build_value(&params);
        assert_eq!(doc["ceip"]["settings"]["ceip_enabled"], true);
        assert_eq!(doc["new_vcsa"]["appliance"]["thin_disk_mode"], false);
        assert_eq!(doc["new_vcsa"]["os"]["ssh_enable"], true);
    }

    #[test]
    fn test_ipv6_family() {
        let mut params = static_params();
        params.network = NetworkParams::Static {
            ip: "fd00::5".to_string(),
            prefix: "64".to_string(),
            gateway: "fd00::1".to_string(),
            dns_servers: vec!["fd00::53".to_string()],
        };

        let config = ConfigBuilder::with_comments("").build(&params).unwrap();
        assert_eq!(config.new_vcsa.network.ip_family, IpFamily::Ipv6);
        assert_eq!(config.new_vcsa.network.mode, NetworkMode::Static);
    }

    #[test]
    fn test_rejects_bad_schema_version() {
        let mut params = static_params();
        params.schema_version = "latest".to_string();

        assert!(ConfigBuilder::new().build(&params).is_err());
    }

    #[test]
    fn test_credentials_are_plain_strings() {
        let config = ConfigBuilder::with_comments("").build(&static_params()).unwrap();
        let json = config.to_json().unwrap();

        assert!(json.contains("\"password\": \"VMware1!\""));
        assert!(!json.contains("SecretString"));
        assert!(!json.contains("***"));
        assert!(!format!("{:?}", config).contains("VMware1!"));
    }

    #[tokio::test]
    async fn test_write_config_creates_parents() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/vcsa.json");
        let config = ConfigBuilder::with_comments("").build(&static_params()).unwrap();

        write_config(&config, &path).await.unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["new_vcsa"]["appliance"]["deployment_option"], "medium");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_config_restricts_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("vcsa.json");
        std::fs::write(&path, "x".repeat(64 * 1024)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let config = ConfigBuilder::with_comments("").build(&static_params()).unwrap();
        write_config(&config, &path).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["new_vcsa"]["appliance"]["name"], "vcsa01");
    }
}
