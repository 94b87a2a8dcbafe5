// file: src/installer/mod.rs
// version: 2.0.0
// guid: 52362c6f-4a21-4360-9e30-ba451ee64d3e

//! External installer invocation
//!
//! Runs `vcsa-deploy install` against a written template. The installer is
//! invoked once; a failure is reported and never retried, and the template is
//! left on disk.

use crate::error::DeployError;
use crate::utils::SystemUtils;
use crate::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Installer executable looked up on PATH when no path is given
pub const DEFAULT_INSTALLER: &str = "vcsa-deploy";

/// Flags always passed to the installer
pub const FIXED_FLAGS: [&str; 3] = [
    "--accept-eula",
    "--acknowledge-ceip",
    "--no-ssl-certificate-verification",
];

/// Where the installer ships on the appliance ISO
pub const INSTALLER_HINT: &str =
    "mount the vCenter Server Appliance ISO and pass --installer <iso>/vcsa-cli-installer/lin64/vcsa-deploy";

/// Optional installer modes
#[derive(Debug, Clone, Default)]
pub struct InstallerOptions {
    /// Run the installer's prechecks without deploying
    pub precheck_only: bool,
    /// Only verify the template
    pub verify_template_only: bool,
    /// Directory for installer logs
    pub log_dir: Option<PathBuf>,
}

/// Handle to a resolved installer executable
#[derive(Debug, Clone)]
pub struct Installer {
    path: PathBuf,
    options: InstallerOptions,
}

impl Installer {
    /// Use `path` as-is without checking that it exists
    pub fn new(path: impl Into<PathBuf>, options: InstallerOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Locate the installer from a path or a command name on PATH
    pub fn resolve(name_or_path: &str, options: InstallerOptions) -> Result<Self> {
        let path = SystemUtils::resolve_executable(name_or_path).ok_or_else(|| {
            DeployError::InstallerNotFound(format!("{} ({})", name_or_path, INSTALLER_HINT))
        })?;
        debug!("Resolved installer to {}", path.display());
        Ok(Self::new(path, options))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Installer arguments; the template path always comes last
    pub fn build_args(&self, config_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["install".into()];
        args.extend(FIXED_FLAGS.iter().map(|flag| OsString::from(*flag)));

        if self.options.precheck_only {
            args.push("--precheck-only".into());
        }
        if self.options.verify_template_only {
            args.push("--verify-template-only".into());
        }
        if let Some(log_dir) = &self.options.log_dir {
            args.push("--log-dir".into());
            args.push(log_dir.as_os_str().to_owned());
        }

        args.push(config_path.as_os_str().to_owned());
        args
    }

    /// Run the installer and wait for it to finish
    pub async fn run(&self, config_path: &Path) -> Result<()> {
        let command = self.path.display().to_string();
        let args = self.build_args(config_path);

        info!("Running {} install with template {}", command, config_path.display());
        debug!("Installer arguments: {:?}", args);

        let status = Command::new(&self.path)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DeployError::ProcessError {
                command: command.clone(),
                exit_code: None,
                stderr: format!("Failed to execute installer: {}", e),
            })?;

        if !status.success() {
            return Err(DeployError::ProcessError {
                command,
                exit_code: status.code(),
                stderr: format!(
                    "installer reported failure; template left at {}",
                    config_path.display()
                ),
            });
        }

        debug!("Installer exited successfully");
        Ok(())
    }
}
