// file: src/main.rs
// version: 2.0.0
// guid: 3f71cd25-36f8-4fb7-ad69-756174fce743

//! vCenter Server Appliance Deploy Agent - Main entry point

use clap::Parser;
use tokio::signal;
use tracing::{error, warn};
use vcsa_deploy_agent::{
    cli::{args::Cli, args::Commands, commands::*},
    logging::logger,
    DeployError,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let command_future = async {
        match cli.command {
            Commands::Deploy {
                params,
                output,
                installer,
                dry_run,
                precheck_only,
                verify_template_only,
                log_dir,
                yes,
            } => {
                let options = DeployOptions {
                    output,
                    installer,
                    dry_run,
                    yes,
                    installer_options: installer_options(
                        precheck_only,
                        verify_template_only,
                        log_dir,
                    ),
                };
                deploy_command(params, options).await
            }
            Commands::Generate { params, output } => generate_command(params, &output).await,
            Commands::CheckPrereqs { installer } => check_prerequisites_command(&installer).await,
        }
    };

    // Prompts run on the blocking pool, so this branch stays live while they wait.
    // A written template is left in place on interrupt.
    let result = tokio::select! {
        result = command_future => result,
        _ = signal::ctrl_c() => {
            warn!("Interrupted by user");
            std::process::exit(DeployError::Interrupted.exit_code());
        }
    };

    match result {
        Ok(()) => {}
        Err(DeployError::Interrupted) => {
            warn!("Interrupted by user");
            std::process::exit(DeployError::Interrupted.exit_code());
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
