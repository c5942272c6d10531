//! End-to-end verification harness for cloud-init style provisioning
//!
//! Runs the provisioning tool against fixture user-data and verifies the
//! expected host-state side effects: discovery bootstrap file, injected
//! SSH keys, and a spawned service unit.

use clap::Parser;
use cloudinit_verify::{cli, common};

#[derive(Parser)]
#[command(name = "cloudinit-verify", about = "Provisioning verification harness")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: cli::Commands,
}

fn main() {
    common::logging::init();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
