// file: src/config/params.rs
// version: 1.0.0
// guid: ec2acb03-3a4b-4807-9ea4-8507cf52793f

//! Deployment parameters before and after collection
//!
//! [`PartialParams`] is what flags, environment variables and the answers file
//! provide; any of its fields may be missing. [`DeploymentParams`] is the fully
//! resolved, typed set the builder consumes.

use super::{
    DeploymentSize, IpFamily, NetworkMode, DEFAULT_ESXI_USERNAME, DEFAULT_SCHEMA_VERSION,
    DEFAULT_SSO_DOMAIN,
};
use crate::error::DeployError;
use crate::security::{SecretString, ValidationUtils};
use serde::{Deserialize, Deserializer};

/// Raw parameter values; `None` means "not provided, ask or fail"
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialParams {
    pub esxi_host: Option<String>,
    pub esxi_username: Option<String>,
    pub esxi_password: Option<SecretString>,
    pub datastore: Option<String>,
    pub network_name: Option<String>,
    pub deployment_size: Option<String>,
    pub appliance_name: Option<String>,
    pub root_password: Option<SecretString>,
    pub sso_password: Option<SecretString>,
    pub sso_domain: Option<String>,
    pub network_mode: Option<String>,
    pub fqdn: Option<String>,
    pub ip: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub prefix: Option<String>,
    pub gateway: Option<String>,
    #[serde(deserialize_with = "list_or_string")]
    pub dns_servers: Option<String>,
    #[serde(deserialize_with = "list_or_string")]
    pub ntp_servers: Option<String>,
    #[serde(deserialize_with = "bool_or_string")]
    pub ceip_enabled: Option<bool>,
    #[serde(deserialize_with = "bool_or_string")]
    pub thin_disk_mode: Option<bool>,
    #[serde(deserialize_with = "bool_or_string")]
    pub ssh_enable: Option<bool>,
    pub schema_version: Option<String>,
}

impl PartialParams {
    /// Fill every field missing here from `fallback`
    pub fn or(self, fallback: PartialParams) -> PartialParams {
        PartialParams {
            esxi_host: self.esxi_host.or(fallback.esxi_host),
            esxi_username: self.esxi_username.or(fallback.esxi_username),
            esxi_password: self.esxi_password.or(fallback.esxi_password),
            datastore: self.datastore.or(fallback.datastore),
            network_name: self.network_name.or(fallback.network_name),
            deployment_size: self.deployment_size.or(fallback.deployment_size),
            appliance_name: self.appliance_name.or(fallback.appliance_name),
            root_password: self.root_password.or(fallback.root_password),
            sso_password: self.sso_password.or(fallback.sso_password),
            sso_domain: self.sso_domain.or(fallback.sso_domain),
            network_mode: self.network_mode.or(fallback.network_mode),
            fqdn: self.fqdn.or(fallback.fqdn),
            ip: self.ip.or(fallback.ip),
            prefix: self.prefix.or(fallback.prefix),
            gateway: self.gateway.or(fallback.gateway),
            dns_servers: self.dns_servers.or(fallback.dns_servers),
            ntp_servers: self.ntp_servers.or(fallback.ntp_servers),
            ceip_enabled: self.ceip_enabled.or(fallback.ceip_enabled),
            thin_disk_mode: self.thin_disk_mode.or(fallback.thin_disk_mode),
            ssh_enable: self.ssh_enable.or(fallback.ssh_enable),
            schema_version: self.schema_version.or(fallback.schema_version),
        }
    }

    /// Toggles with documented defaults applied
    pub fn toggles(&self) -> DeploymentToggles {
        let defaults = DeploymentToggles::default();
        DeploymentToggles {
            ceip_enabled: self.ceip_enabled.unwrap_or(defaults.ceip_enabled),
            thin_disk_mode: self.thin_disk_mode.unwrap_or(defaults.thin_disk_mode),
            ssh_enable: self.ssh_enable.unwrap_or(defaults.ssh_enable),
        }
    }
}

/// Switches that were implicit literals in older deployment scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentToggles {
    /// Join the Customer Experience Improvement Program (default: false)
    pub ceip_enabled: bool,
    /// Thin-provision the appliance disks (default: true)
    pub thin_disk_mode: bool,
    /// Enable SSH on the appliance (default: false)
    pub ssh_enable: bool,
}

impl Default for DeploymentToggles {
    fn default() -> Self {
        Self {
            ceip_enabled: false,
            thin_disk_mode: true,
            ssh_enable: false,
        }
    }
}

/// Appliance addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkParams {
    Static {
        ip: String,
        prefix: String,
        gateway: String,
        dns_servers: Vec<String>,
    },
    Dhcp,
}

impl NetworkParams {
    pub fn mode(&self) -> NetworkMode {
        match self {
            NetworkParams::Static { .. } => NetworkMode::Static,
            NetworkParams::Dhcp => NetworkMode::Dhcp,
        }
    }

    /// Address family implied by the static address; DHCP deployments are IPv4
    pub fn ip_family(&self) -> crate::Result<IpFamily> {
        match self {
            NetworkParams::Static { ip, .. } => {
                Ok(ValidationUtils::validate_ip_address("IP address", ip)?.into())
            }
            NetworkParams::Dhcp => Ok(IpFamily::Ipv4),
        }
    }
}

/// Fully resolved deployment parameters
#[derive(Debug, Clone)]
pub struct DeploymentParams {
    pub esxi_host: String,
    pub esxi_username: String,
    pub esxi_password: SecretString,
    pub datastore: String,
    pub network_name: String,
    pub deployment_size: DeploymentSize,
    pub appliance_name: String,
    pub root_password: SecretString,
    /// Falls back to `root_password` when not set
    pub sso_password: Option<SecretString>,
    pub sso_domain: String,
    pub fqdn: Option<String>,
    pub network: NetworkParams,
    pub ntp_servers: Vec<String>,
    pub toggles: DeploymentToggles,
    pub schema_version: String,
}

impl DeploymentParams {
    /// Validate the resolved parameters
    pub fn validate(&self) -> crate::Result<()> {
        ValidationUtils::validate_host("ESXi host", &self.esxi_host)?;
        ValidationUtils::validate_required("ESXi username", &self.esxi_username)?;
        ValidationUtils::validate_required("Datastore", &self.datastore)?;
        ValidationUtils::validate_required("Deployment network", &self.network_name)?;
        ValidationUtils::validate_required("Appliance name", &self.appliance_name)?;
        ValidationUtils::validate_required("SSO domain", &self.sso_domain)?;
        ValidationUtils::validate_schema_version(&self.schema_version)?;

        if self.esxi_password.is_empty() {
            return Err(DeployError::validation("ESXi password cannot be empty"));
        }
        if self.root_password.is_empty() {
            return Err(DeployError::validation("Appliance root password cannot be empty"));
        }

        if let Some(fqdn) = &self.fqdn {
            ValidationUtils::validate_hostname("FQDN", fqdn)?;
        }

        for server in &self.ntp_servers {
            ValidationUtils::validate_host("NTP server", server)?;
        }

        if let NetworkParams::Static {
            ip,
            prefix,
            gateway,
            dns_servers,
        } = &self.network
        {
            let family = IpFamily::from(ValidationUtils::validate_ip_address("IP address", ip)?);
            ValidationUtils::validate_prefix(prefix, family)?;

            let gateway_family =
                IpFamily::from(ValidationUtils::validate_ip_address("Gateway", gateway)?);
            if gateway_family != family {
                return Err(DeployError::validation(format!(
                    "Gateway {} is not {} like the appliance address {}",
                    gateway,
                    family.as_str(),
                    ip
                )));
            }

            if dns_servers.is_empty() {
                return Err(DeployError::validation(
                    "At least one DNS server is required for static networking",
                ));
            }
            for dns in dns_servers {
                ValidationUtils::validate_ip_address("DNS server", dns)?;
            }

            if self.fqdn.is_none() {
                return Err(DeployError::validation(
                    "FQDN is required for static networking",
                ));
            }
        }

        Ok(())
    }

    /// SSO administrator password, defaulting to the appliance root password
    pub fn effective_sso_password(&self) -> &SecretString {
        self.sso_password.as_ref().unwrap_or(&self.root_password)
    }
}

/// Defaults applied to fields that are never prompted for
pub(crate) fn default_esxi_username() -> String {
    DEFAULT_ESXI_USERNAME.to_string()
}

pub(crate) fn default_sso_domain() -> String {
    DEFAULT_SSO_DOMAIN.to_string()
}

pub(crate) fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrString {
    List(Vec<String>),
    Joined(String),
}

/// Accept either a YAML sequence or a comma-delimited string
fn list_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<ListOrString>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        ListOrString::List(items) => items.join(","),
        ListOrString::Joined(s) => s,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Number(u64),
    Text(String),
}

/// Accept `prefix: 24` as well as `prefix: "24"`
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Number(n) => n.to_string(),
        StringOrNumber::Text(s) => s,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

/// Accept `ssh_enable: true` as well as a substituted `"true"`
fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(Some(true)),
            "false" | "no" | "off" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected true or false, found '{}'",
                other
            ))),
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn static_params() -> DeploymentParams {
        DeploymentParams {
            esxi_host: "esx01.lab.local".to_string(),
            esxi_username: "root".to_string(),
            esxi_password: SecretString::from("EsxiPass1!"),
            datastore: "datastore1".to_string(),
            network_name: "VM Network".to_string(),
            deployment_size: DeploymentSize::Medium,
            appliance_name: "vcsa01".to_string(),
            root_password: SecretString::from("VMware1!"),
            sso_password: None,
            sso_domain: "vsphere.local".to_string(),
            fqdn: Some("vcsa01.lab.local".to_string()),
            network: NetworkParams::Static {
                ip: "10.0.0.5".to_string(),
                prefix: "24".to_string(),
                gateway: "10.0.0.1".to_string(),
                dns_servers: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
            },
            ntp_servers: vec!["pool.ntp.org".to_string()],
            toggles: DeploymentToggles::default(),
            schema_version: "2.13.0".to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(static_params().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_fields() {
        let mut p = static_params();
        p.datastore = " ".to_string();
        assert!(p.validate().is_err());

        let mut p = static_params();
        p.root_password = SecretString::default();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_static_network() {
        let mut p = static_params();
        p.network = NetworkParams::Static {
            ip: "10.0.0.5".to_string(),
            prefix: "40".to_string(),
            gateway: "10.0.0.1".to_string(),
            dns_servers: vec!["8.8.8.8".to_string()],
        };
        assert!(p.validate().is_err());

        p.network = NetworkParams::Static {
            ip: "10.0.0.5".to_string(),
            prefix: "24".to_string(),
            gateway: "fd00::1".to_string(),
            dns_servers: vec!["8.8.8.8".to_string()],
        };
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Gateway"));

        p.network = NetworkParams::Static {
            ip: "10.0.0.5".to_string(),
            prefix: "24".to_string(),
            gateway: "10.0.0.1".to_string(),
            dns_servers: vec![],
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_static_requires_fqdn_dhcp_does_not() {
        let mut p = static_params();
        p.fqdn = None;
        assert!(p.validate().is_err());

        p.network = NetworkParams::Dhcp;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_effective_sso_password() {
        let mut p = static_params();
        p.effective_sso_password()
            .expose(|plain| assert_eq!(plain, "VMware1!"));

        p.sso_password = Some(SecretString::from("SsoPass1!"));
        p.effective_sso_password()
            .expose(|plain| assert_eq!(plain, "SsoPass1!"));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let rendered = format!("{:?}", static_params());
        assert!(!rendered.contains("VMware1!"));
        assert!(!rendered.contains("EsxiPass1!"));
    }

    #[test]
    fn test_partial_or_prefers_self() {
        let flags = PartialParams {
            esxi_host: Some("from-flag".to_string()),
            ..Default::default()
        };
        let answers = PartialParams {
            esxi_host: Some("from-file".to_string()),
            datastore: Some("ds-file".to_string()),
            ..Default::default()
        };

        let merged = flags.or(answers);
        assert_eq!(merged.esxi_host.as_deref(), Some("from-flag"));
        assert_eq!(merged.datastore.as_deref(), Some("ds-file"));
        assert!(merged.gateway.is_none());
    }

    #[test]
    fn test_toggle_defaults() {
        let toggles = PartialParams::default().toggles();
        assert_eq!(toggles, DeploymentToggles::default());
        assert!(!toggles.ceip_enabled);
        assert!(toggles.thin_disk_mode);
        assert!(!toggles.ssh_enable);

        let custom = PartialParams {
            ssh_enable: Some(true),
            ..Default::default()
        }
        .toggles();
        assert!(custom.ssh_enable);
    }

    #[test]
    fn test_partial_from_yaml_accepts_lists_and_numbers() {
        let yaml = r#"
esxi_host: esx01.lab.local
prefix: 24
dns_servers:
  - 8.8.8.8
  - 8.8.4.4
ntp_servers: "pool.ntp.org"
root_password: "VMware1!"
"#;
        let partial: PartialParams = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(partial.prefix.as_deref(), Some("24"));
        assert_eq!(partial.dns_servers.as_deref(), Some("8.8.8.8,8.8.4.4"));
        assert_eq!(partial.ntp_servers.as_deref(), Some("pool.ntp.org"));
        assert!(partial.root_password.is_some());
    }

    #[test]
    fn test_partial_toggles_accept_strings() {
        let partial: PartialParams =
            serde_yaml::from_str("ssh_enable: \"true\"\nceip_enabled: \"no\"\nthin_disk_mode: false\n")
                .unwrap();
        assert_eq!(partial.ssh_enable, Some(true));
        assert_eq!(partial.ceip_enabled, Some(false));
        assert_eq!(partial.thin_disk_mode, Some(false));

        let result: std::result::Result<PartialParams, _> = serde_yaml::from_str("ssh_enable: maybe\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_rejects_unknown_keys() {
        let result: std::result::Result<PartialParams, _> =
            serde_yaml::from_str("esxi_hostname: typo\n");
        assert!(result.is_err());
    }
}
