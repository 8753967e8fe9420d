//! supplicant-config entry point.
//!
//! Runs once before `wpa_supplicant` is started:
//!
//! 1. `/data/misc/wifi/wpa_supplicant.conf` must exist. If it cannot be
//!    provisioned the process exits with a failure status and Wi-Fi stays off.
//! 2. `/data/misc/wifi/p2p_supplicant.conf` is provisioned if possible; a
//!    failure does not change the exit status.
//!
//! All paths are fixed. The log level is taken from `RUST_LOG` (default
//! `info`).

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use supplicant_config::{
    prepare_supplicant_configs, ConfigProvisioner, OsFileSystem, ProvisionerConfig,
};

/// Seeds the wpa_supplicant config files from the system template.
///
/// Takes no options besides `--help` and `--version`.
#[derive(Debug, Parser)]
#[command(name = "supplicant-config", version)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            error!("Wi-Fi will not be enabled");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let provisioner = ConfigProvisioner::new(OsFileSystem::new(), ProvisionerConfig::default());

    let report = prepare_supplicant_configs(&provisioner)
        .context("supplicant config is unavailable")?;

    info!(
        "supplicant configs ready (primary: {:?}, p2p: {:?})",
        report.primary, report.secondary
    );
    Ok(())
}
