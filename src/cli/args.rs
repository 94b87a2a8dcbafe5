// file: src/cli/args.rs
// version: 2.0.0
// guid: 70fae094-5e15-4617-b11b-b87af72aea49

//! Command line argument definitions

use crate::config::{DeploymentSize, NetworkMode, PartialParams};
use crate::installer::DEFAULT_INSTALLER;
use crate::security::SecretString;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vcsa-deploy-agent")]
#[command(about = "Build a vCenter Server Appliance deployment template and run the CLI installer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect parameters, write the template and run the installer
    Deploy {
        #[command(flatten)]
        params: ParamArgs,

        #[arg(short, long, default_value = "vcsa-deploy.json", help = "Where to write the template")]
        output: String,

        #[arg(long, default_value = DEFAULT_INSTALLER, help = "Installer executable path or name on PATH")]
        installer: String,

        #[arg(long, help = "Write the template but do not run the installer")]
        dry_run: bool,

        #[arg(long, help = "Run installer prechecks only")]
        precheck_only: bool,

        #[arg(long, help = "Only verify the template with the installer")]
        verify_template_only: bool,

        #[arg(long, help = "Directory for installer logs")]
        log_dir: Option<String>,

        #[arg(short, long, help = "Skip the confirmation before running the installer")]
        yes: bool,
    },

    /// Collect parameters and write the template without running the installer
    Generate {
        #[command(flatten)]
        params: ParamArgs,

        #[arg(short, long, default_value = "vcsa-deploy.json", help = "Where to write the template")]
        output: String,
    },

    /// Check that the installer executable can be found
    CheckPrereqs {
        #[arg(long, default_value = DEFAULT_INSTALLER, help = "Installer executable path or name on PATH")]
        installer: String,
    },
}

/// Deployment parameters shared by `deploy` and `generate`
#[derive(Args, Default)]
pub struct ParamArgs {
    #[arg(short, long, help = "YAML answers file supplying any parameter")]
    pub answers: Option<String>,

    #[arg(long, help = "Fail instead of prompting for missing parameters")]
    pub non_interactive: bool,

    #[arg(long, help = "ESXi host address")]
    pub esxi_host: Option<String>,

    #[arg(long, help = "ESXi login (default: root)")]
    pub esxi_username: Option<String>,

    #[arg(long, env = "VCSA_ESXI_PASSWORD", hide_env_values = true, help = "ESXi password")]
    pub esxi_password: Option<String>,

    #[arg(long, help = "Datastore for the appliance")]
    pub datastore: Option<String>,

    #[arg(long, help = "Port group the appliance is attached to")]
    pub network_name: Option<String>,

    #[arg(long, value_enum)]
    pub deployment_size: Option<SizeArg>,

    #[arg(long, help = "Appliance VM name")]
    pub appliance_name: Option<String>,

    #[arg(long, env = "VCSA_ROOT_PASSWORD", hide_env_values = true, help = "Appliance root password")]
    pub root_password: Option<String>,

    #[arg(long, env = "VCSA_SSO_PASSWORD", hide_env_values = true, help = "SSO administrator password (default: root password)")]
    pub sso_password: Option<String>,

    #[arg(long, help = "SSO domain (default: vsphere.local)")]
    pub sso_domain: Option<String>,

    #[arg(long, value_enum)]
    pub network_mode: Option<ModeArg>,

    #[arg(long, help = "Appliance FQDN")]
    pub fqdn: Option<String>,

    #[arg(long, help = "Static IP address")]
    pub ip: Option<String>,

    #[arg(long, help = "Subnet prefix length, e.g. 24")]
    pub prefix: Option<String>,

    #[arg(long, help = "Default gateway")]
    pub gateway: Option<String>,

    #[arg(long, help = "Comma-separated DNS servers")]
    pub dns_servers: Option<String>,

    #[arg(long, help = "Comma-separated NTP servers")]
    pub ntp_servers: Option<String>,

    #[arg(long, value_name = "BOOL", help = "Join CEIP (default: false)")]
    pub ceip_enabled: Option<bool>,

    #[arg(long, value_name = "BOOL", help = "Thin-provision disks (default: true)")]
    pub thin_disk_mode: Option<bool>,

    #[arg(long, value_name = "BOOL", help = "Enable SSH on the appliance (default: false)")]
    pub ssh_enable: Option<bool>,

    #[arg(long, help = "Template schema version (default: 2.13.0)")]
    pub schema_version: Option<String>,
}

impl ParamArgs {
    /// Values given on the command line or through the environment.
    ///
    /// Consumes the arguments so credential strings move into their
    /// zeroizing holders instead of being copied.
    pub fn into_partial(self) -> PartialParams {
        PartialParams {
            esxi_host: self.esxi_host,
            esxi_username: self.esxi_username,
            esxi_password: self.esxi_password.map(SecretString::new),
            datastore: self.datastore,
            network_name: self.network_name,
            deployment_size: self
                .deployment_size
                .map(|s| DeploymentSize::from(s).as_str().to_string()),
            appliance_name: self.appliance_name,
            root_password: self.root_password.map(SecretString::new),
            sso_password: self.sso_password.map(SecretString::new),
            sso_domain: self.sso_domain,
            network_mode: self
                .network_mode
                .map(|m| NetworkMode::from(m).as_str().to_string()),
            fqdn: self.fqdn,
            ip: self.ip,
            prefix: self.prefix,
            gateway: self.gateway,
            dns_servers: self.dns_servers,
            ntp_servers: self.ntp_servers,
            ceip_enabled: self.ceip_enabled,
            thin_disk_mode: self.thin_disk_mode,
            ssh_enable: self.ssh_enable,
            schema_version: self.schema_version,
        }
    }
}

/// Deployment size argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum SizeArg {
    Tiny,
    Small,
    Medium,
    Large,
}

impl From<SizeArg> for DeploymentSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Tiny => DeploymentSize::Tiny,
            SizeArg::Small => DeploymentSize::Small,
            SizeArg::Medium => DeploymentSize::Medium,
            SizeArg::Large => DeploymentSize::Large,
        }
    }
}

/// Network mode argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Static,
    Dhcp,
}

impl From<ModeArg> for NetworkMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Static => NetworkMode::Static,
            ModeArg::Dhcp => NetworkMode::Dhcp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "vcsa-deploy-agent",
            "generate",
            "--esxi-host",
            "esx01.lab.local",
            "--deployment-size",
            "medium",
            "--network-mode",
            "static",
            "--ssh-enable",
            "true",
            "-o",
            "out.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { params, output } => {
                assert_eq!(output, "out.json");
                let partial = params.into_partial();
                assert_eq!(partial.esxi_host.as_deref(), Some("esx01.lab.local"));
                assert_eq!(partial.deployment_size.as_deref(), Some("medium"));
                assert_eq!(partial.network_mode.as_deref(), Some("static"));
                assert_eq!(partial.ssh_enable, Some(true));
                assert!(partial.thin_disk_mode.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_rejects_unknown_size() {
        let result = Cli::try_parse_from([
            "vcsa-deploy-agent",
            "generate",
            "--deployment-size",
            "xlarge",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deploy_defaults() {
        let cli = Cli::try_parse_from(["vcsa-deploy-agent", "deploy"]).unwrap();
        match cli.command {
            Commands::Deploy {
                output,
                installer,
                dry_run,
                yes,
                ..
            } => {
                assert_eq!(output, "vcsa-deploy.json");
                assert_eq!(installer, "vcsa-deploy");
                assert!(!dry_run);
                assert!(!yes);
            }
            _ => panic!("expected deploy"),
        }
    }
}
