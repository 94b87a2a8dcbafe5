// file: src/prompt/collector.rs
// version: 1.0.0
// guid: c17c0456-dedd-4ed1-ac79-973201b78c67

//! Resolves every deployment parameter from supplied values or prompts

use super::{Field, Prompter};
use crate::config::params::{default_esxi_username, default_schema_version, default_sso_domain};
use crate::config::{
    DeploymentParams, DeploymentSize, IpFamily, NetworkMode, NetworkParams, PartialParams,
};
use crate::error::DeployError;
use crate::security::{SecretString, ValidationUtils};
use crate::Result;
use std::str::FromStr;
use tracing::{debug, warn};

const ESXI_HOST: Field = Field::new("ESXi host address", "--esxi-host");
const ESXI_PASSWORD: Field =
    Field::with_env("ESXi host password", "--esxi-password", "VCSA_ESXI_PASSWORD");
const DATASTORE: Field = Field::new("Datastore name", "--datastore");
const NETWORK_NAME: Field = Field::new("Deployment network (port group)", "--network-name");
const DEPLOYMENT_SIZE: Field = Field::new("Deployment size", "--deployment-size");
const APPLIANCE_NAME: Field = Field::new("Appliance VM name", "--appliance-name");
const ROOT_PASSWORD: Field =
    Field::with_env("Appliance root password", "--root-password", "VCSA_ROOT_PASSWORD");
const NETWORK_MODE: Field = Field::new("Network mode", "--network-mode");
const FQDN: Field = Field::new("Appliance FQDN", "--fqdn");
const FQDN_OPTIONAL: Field = Field::new("Appliance FQDN (optional)", "--fqdn");
const IP: Field = Field::new("Appliance IP address", "--ip");
const PREFIX: Field = Field::new("Subnet prefix length", "--prefix");
const GATEWAY: Field = Field::new("Default gateway", "--gateway");
const DNS_SERVERS: Field = Field::new("DNS servers (comma separated)", "--dns-servers");
const NTP_SERVERS: Field =
    Field::new("NTP servers (comma separated, blank to sync with host)", "--ntp-servers");

const DEFAULT_NETWORK_NAME: &str = "VM Network";
const DEFAULT_APPLIANCE_NAME: &str = "vCenter-Server-Appliance";
const DEFAULT_SIZE_INDEX: usize = 1;
const DEFAULT_MODE_INDEX: usize = 0;

/// Merges supplied values with answers from a [`Prompter`]
pub struct ParamCollector<'a, P: Prompter> {
    prompter: &'a mut P,
}

impl<'a, P: Prompter> ParamCollector<'a, P> {
    pub fn new(prompter: &'a mut P) -> Self {
        Self { prompter }
    }

    /// Resolve every parameter. Static-only fields are asked for only in static mode.
    pub fn collect(&mut self, partial: PartialParams) -> Result<DeploymentParams> {
        let toggles = partial.toggles();
        let ignored_if_dhcp = ignored_static_fields(&partial);

        let esxi_host = self.required(&ESXI_HOST, partial.esxi_host, None, |v| {
            ValidationUtils::validate_host(ESXI_HOST.label, v)?;
            Ok(v.to_string())
        })?;
        let esxi_password = self.secret(&ESXI_PASSWORD, partial.esxi_password)?;
        let datastore = self.required(&DATASTORE, partial.datastore, None, |v| {
            text(&DATASTORE, v)
        })?;
        let network_name = self.required(
            &NETWORK_NAME,
            partial.network_name,
            Some(DEFAULT_NETWORK_NAME),
            |v| text(&NETWORK_NAME, v),
        )?;
        let deployment_size = self.choice(
            &DEPLOYMENT_SIZE,
            partial.deployment_size,
            &DeploymentSize::ALL,
            DeploymentSize::as_str,
            DEFAULT_SIZE_INDEX,
        )?;
        let appliance_name = self.required(
            &APPLIANCE_NAME,
            partial.appliance_name,
            Some(DEFAULT_APPLIANCE_NAME),
            |v| text(&APPLIANCE_NAME, v),
        )?;
        let root_password = self.secret(&ROOT_PASSWORD, partial.root_password)?;
        let mode = self.choice(
            &NETWORK_MODE,
            partial.network_mode,
            &NetworkMode::ALL,
            NetworkMode::as_str,
            DEFAULT_MODE_INDEX,
        )?;

        let (fqdn, network) = match mode {
            NetworkMode::Static => {
                let fqdn = self.required(&FQDN, partial.fqdn, None, hostname)?;
                let (ip, family) = self.required(&IP, partial.ip, None, |v| {
                    let addr = ValidationUtils::validate_ip_address(IP.label, v)?;
                    Ok((v.to_string(), IpFamily::from(addr)))
                })?;
                let prefix = self.required(&PREFIX, partial.prefix, None, |v| {
                    ValidationUtils::validate_prefix(v, family)?;
                    Ok(v.to_string())
                })?;
                let gateway = self.required(&GATEWAY, partial.gateway, None, |v| {
                    let addr = ValidationUtils::validate_ip_address(GATEWAY.label, v)?;
                    if IpFamily::from(addr) != family {
                        return Err(DeployError::validation(format!(
                            "Gateway {} must be {} like the appliance address",
                            v,
                            family.as_str()
                        )));
                    }
                    Ok(v.to_string())
                })?;
                let dns_servers = self.required(&DNS_SERVERS, partial.dns_servers, None, |v| {
                    ValidationUtils::parse_ip_list(DNS_SERVERS.label, v)
                })?;

                (
                    Some(fqdn),
                    NetworkParams::Static {
                        ip,
                        prefix,
                        gateway,
                        dns_servers,
                    },
                )
            }
            NetworkMode::Dhcp => {
                debug!("DHCP selected, skipping static addressing prompts");
                if !ignored_if_dhcp.is_empty() {
                    warn!("DHCP selected, ignoring {}", ignored_if_dhcp.join(", "));
                }
                let fqdn = self.optional(&FQDN_OPTIONAL, partial.fqdn, hostname)?;
                (fqdn, NetworkParams::Dhcp)
            }
        };

        let ntp_servers = self
            .optional(&NTP_SERVERS, partial.ntp_servers, |v| {
                ValidationUtils::parse_host_list(NTP_SERVERS.label, v)
            })?
            .unwrap_or_default();

        let params = DeploymentParams {
            esxi_host,
            esxi_username: partial.esxi_username.unwrap_or_else(default_esxi_username),
            esxi_password,
            datastore,
            network_name,
            deployment_size,
            appliance_name,
            root_password,
            sso_password: partial.sso_password.filter(|s| !s.is_empty()),
            sso_domain: partial.sso_domain.unwrap_or_else(default_sso_domain),
            fqdn,
            network,
            ntp_servers,
            toggles,
            schema_version: partial.schema_version.unwrap_or_else(default_schema_version),
        };

        params.validate()?;
        Ok(params)
    }

    /// Ask a yes/no question through the underlying prompter
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        self.prompter.confirm(prompt, default)
    }

    fn required<T>(
        &mut self,
        field: &Field,
        given: Option<String>,
        default: Option<&str>,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        if let Some(value) = given {
            return parse(value.trim());
        }

        loop {
            let answer = self.prompter.input(field, default, false)?;
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(e) if self.prompter.is_interactive() => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
    }

    fn optional<T>(
        &mut self,
        field: &Field,
        given: Option<String>,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        if let Some(value) = given {
            let value = value.trim();
            return if value.is_empty() {
                Ok(None)
            } else {
                parse(value).map(Some)
            };
        }

        loop {
            let answer = self.prompter.input(field, None, true)?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) if self.prompter.is_interactive() => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
    }

    fn choice<T>(
        &mut self,
        field: &Field,
        given: Option<String>,
        all: &[T],
        name: fn(&T) -> &'static str,
        default: usize,
    ) -> Result<T>
    where
        T: Copy + FromStr<Err = DeployError>,
    {
        if let Some(value) = given {
            return value.trim().parse();
        }

        let items: Vec<&str> = all.iter().map(name).collect();
        let index = self.prompter.select(field, &items, default)?;
        all.get(index)
            .copied()
            .ok_or_else(|| DeployError::prompt(format!("Invalid selection for {}", field.label)))
    }

    fn secret(&mut self, field: &Field, given: Option<SecretString>) -> Result<SecretString> {
        if let Some(secret) = given.filter(|s| !s.is_empty()) {
            return Ok(secret);
        }

        loop {
            let secret = self.prompter.password(field)?;
            if !secret.is_empty() {
                return Ok(secret);
            }
            if !self.prompter.is_interactive() {
                return Err(field.missing());
            }
            warn!("{} cannot be empty", field.label);
        }
    }
}

/// Flags of static-only values that were supplied anyway
fn ignored_static_fields(partial: &PartialParams) -> Vec<&'static str> {
    [
        (IP.flag, partial.ip.is_some()),
        (PREFIX.flag, partial.prefix.is_some()),
        (GATEWAY.flag, partial.gateway.is_some()),
        (DNS_SERVERS.flag, partial.dns_servers.is_some()),
    ]
    .into_iter()
    .filter_map(|(flag, given)| given.then_some(flag))
    .collect()
}

fn text(field: &Field, value: &str) -> Result<String> {
    ValidationUtils::validate_required(field.label, value)?;
    Ok(value.to_string())
}

fn hostname(value: &str) -> Result<String> {
    ValidationUtils::validate_hostname(FQDN.label, value)?;
    Ok(value.to_string())
}
