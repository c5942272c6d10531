//! CLI command handling
//!
//! Defines the clap commands and dispatches them to the scenario runners.

use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use crate::common::{Error, HarnessConfig, Result};
use crate::harness::HostFs;
use crate::scenarios::{self, ScenarioReport};

#[derive(Subcommand)]
pub enum Commands {
    /// Run verification scenarios against this host
    Run {
        /// Scenario to run (default: all, in order)
        scenario: Option<String>,

        /// Path to a harness configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the scenario reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available scenarios
    List,
}

/// Dispatch a CLI command
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            scenario,
            config,
            json,
        } => run(scenario.as_deref(), config.as_deref(), json),

        Commands::List => {
            for (name, description) in scenarios::catalog() {
                println!("{:<14} {}", name.bold(), description);
            }
            Ok(())
        }
    }
}

fn run(scenario: Option<&str>, config: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => HarnessConfig::load_from(path)?,
        None => HarnessConfig::load()?,
    };

    let selected: Vec<&str> = match scenario {
        Some(name) => vec![name],
        None => scenarios::catalog().iter().map(|(name, _)| *name).collect(),
    };

    // Scenarios run to completion, cleanup included, one at a time
    let mut reports = Vec::new();
    for name in selected {
        reports.push(scenarios::run_named(name, &config, &HostFs)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        summarize(&reports);
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(Error::ScenariosFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

fn summarize(reports: &[ScenarioReport]) {
    println!("\n{}", "Summary:".cyan());
    for report in reports {
        if report.passed {
            println!(
                "  {} {} ({} checks)",
                "✓".green(),
                report.name,
                report.checks_run
            );
        } else {
            let detail = match (&report.error, report.failures.len()) {
                (Some(_), _) => "aborted".to_string(),
                (None, n) => format!("{n} failed checks"),
            };
            println!("  {} {} ({})", "✗".red(), report.name, detail);
        }
    }
}
