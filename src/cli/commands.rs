// file: src/cli/commands.rs
// version: 2.0.0
// guid: 9755f251-8879-4c0e-b21f-5073b2c3f4c0

//! Command implementations for the CLI

use super::args::ParamArgs;
use crate::{
    config::{
        builder::write_config, loader::ConfigLoader, ConfigBuilder, DeploymentConfig,
        DeploymentParams, PartialParams,
    },
    error::DeployError,
    installer::{Installer, InstallerOptions, INSTALLER_HINT},
    logging::logger::{with_async_operation_span, with_operation_span},
    prompt::{NonInteractive, ParamCollector, Prompter, TerminalPrompter},
    utils::SystemUtils,
    Result,
};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Options for the `deploy` command beyond the parameters themselves
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub output: String,
    pub installer: String,
    pub dry_run: bool,
    pub yes: bool,
    pub installer_options: InstallerOptions,
}

/// Collect parameters, write the template and run the installer
pub async fn deploy_command(params: ParamArgs, options: DeployOptions) -> Result<()> {
    if params.non_interactive {
        deploy_with(NonInteractive, params, &options).await
    } else {
        deploy_with(TerminalPrompter::new(), params, &options).await
    }
}

/// Collect parameters and write the template only
pub async fn generate_command(params: ParamArgs, output: &str) -> Result<()> {
    let config = if params.non_interactive {
        build_config(NonInteractive, params).await?.0
    } else {
        build_config(TerminalPrompter::new(), params).await?.0
    };

    let output = SystemUtils::expand_path(output);
    write_config(&config, &output).await?;
    print_summary(&config, &output);

    info!("Template generated; run `vcsa-deploy install` against {} when ready", output.display());
    Ok(())
}

/// Check that the installer can be found
pub async fn check_prerequisites_command(installer: &str) -> Result<()> {
    info!("Checking prerequisites for appliance deployment");

    match Installer::resolve(installer, InstallerOptions::default()) {
        Ok(found) => {
            println!(
                "{} installer found: {}",
                "✓".green(),
                found.path().display()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} installer '{}' not found", "✗".red(), installer);
            println!("  {}", INSTALLER_HINT);
            Err(e)
        }
    }
}

async fn deploy_with<P>(prompter: P, params: ParamArgs, options: &DeployOptions) -> Result<()>
where
    P: Prompter + Send + 'static,
{
    // Resolve first so a missing installer fails before any prompting
    let installer = if options.dry_run {
        None
    } else {
        Some(Installer::resolve(
            &options.installer,
            options.installer_options.clone(),
        )?)
    };

    let (config, mut prompter) = build_config(prompter, params).await?;
    let output = SystemUtils::expand_path(&options.output);
    write_config(&config, &output).await?;
    print_summary(&config, &output);
    drop(config);

    let Some(installer) = installer else {
        info!("DRY RUN: template written, installer not invoked");
        return Ok(());
    };

    if !options.yes && prompter.is_interactive() {
        let proceed = blocking(move || prompter.confirm("Run the installer now?", true)).await?;
        if !proceed {
            return Err(DeployError::Cancelled(format!(
                "installer not run; template kept at {}",
                output.display()
            )));
        }
    }

    with_async_operation_span("install", || installer.run(&output)).await?;
    info!("Appliance deployment completed successfully");
    Ok(())
}

/// Resolve parameters and build the template; parameters are dropped on return.
///
/// The prompter is handed back for later questions.
async fn build_config<P>(mut prompter: P, args: ParamArgs) -> Result<(DeploymentConfig, P)>
where
    P: Prompter + Send + 'static,
{
    blocking(move || {
        let params = with_operation_span("collect", || collect_params(&mut prompter, args))?;
        let config = ConfigBuilder::new().build(&params)?;
        Ok((config, prompter))
    })
    .await
}

/// Run terminal prompts on the blocking pool so the runtime keeps handling Ctrl+C
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DeployError::prompt(format!("Prompt task failed: {}", e)))?
}

/// Flags and environment take precedence over the answers file
fn collect_params<P: Prompter>(prompter: &mut P, mut args: ParamArgs) -> Result<DeploymentParams> {
    let answers = match args.answers.take() {
        Some(path) => ConfigLoader::new().load_answers(SystemUtils::expand_path(&path))?,
        None => PartialParams::default(),
    };

    let partial = args.into_partial().or(answers);
    ParamCollector::new(prompter).collect(partial)
}

/// Label/value pairs describing a template; never includes credentials
pub fn summary_lines(config: &DeploymentConfig, path: &Path) -> Vec<(&'static str, String)> {
    let vcsa = &config.new_vcsa;
    let network = &vcsa.network;

    let addressing = match (&network.ip, &network.prefix, &network.gateway) {
        (Some(ip), Some(prefix), Some(gateway)) => format!(
            "{} {}/{} via {}",
            network.mode.as_str(),
            ip,
            prefix,
            gateway
        ),
        _ => network.mode.as_str().to_string(),
    };

    let mut lines = vec![
        (
            "ESXi host",
            format!("{} ({})", vcsa.esxi.hostname, vcsa.esxi.username),
        ),
        ("Datastore", vcsa.esxi.datastore.clone()),
        ("Network", vcsa.esxi.deployment_network.clone()),
        (
            "Appliance",
            format!(
                "{} ({}, {})",
                vcsa.appliance.name,
                vcsa.appliance.deployment_option.as_str(),
                if vcsa.appliance.thin_disk_mode { "thin" } else { "thick" }
            ),
        ),
        ("Addressing", addressing),
    ];

    if let Some(fqdn) = &network.system_name {
        lines.push(("FQDN", fqdn.clone()));
    }
    if let Some(dns) = &network.dns_servers {
        lines.push(("DNS", dns.join(", ")));
    }
    lines.push((
        "Time",
        match &vcsa.os.ntp_servers {
            Some(ntp) => ntp.join(", "),
            None => "sync with host".to_string(),
        },
    ));
    lines.push(("SSH", on_off(vcsa.os.ssh_enable)));
    lines.push(("CEIP", on_off(config.ceip.settings.ceip_enabled)));
    lines.push(("SSO domain", vcsa.sso.domain_name.clone()));
    lines.push(("Template", path.display().to_string()));
    lines
}

fn on_off(value: bool) -> String {
    (if value { "enabled" } else { "disabled" }).to_string()
}

fn print_summary(config: &DeploymentConfig, path: &Path) {
    println!("\n{}", "=== DEPLOYMENT SUMMARY ===".bold());
    for (label, value) in summary_lines(config, path) {
        println!("  {:<12} {}", format!("{}:", label).cyan(), value);
    }
    println!();
}

/// Map the deploy subcommand's flags to installer options
pub fn installer_options(
    precheck_only: bool,
    verify_template_only: bool,
    log_dir: Option<String>,
) -> InstallerOptions {
    InstallerOptions {
        precheck_only,
        verify_template_only,
        log_dir: log_dir.map(|dir| SystemUtils::expand_path(&dir)),
    }
}
