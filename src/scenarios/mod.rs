//! Verification scenarios
//!
//! Each scenario provisions the host through the tool under test and
//! asserts the resulting host state. Scenarios run strictly sequentially;
//! fatal steps (fixture write, invocation, required artifact reads) abort
//! the remaining checks of that scenario, while assertion mismatches
//! accumulate and fail the scenario at the end. Registered cleanups run on
//! every exit path.

pub mod cloud_config;
pub mod script;

use colored::Colorize;
use serde::Serialize;

use crate::common::{Error, HarnessConfig, Result};
use crate::harness::{Checker, StateReader};

/// Outcome of one scenario run
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    /// Fatal error that aborted the scenario, if any
    pub error: Option<String>,
}

/// Names and one-line descriptions of every scenario, in run order
pub fn catalog() -> &'static [(&'static str, &'static str)] {
    &[
        (
            cloud_config::NAME,
            "provision from a cloud-config document; verify discovery URL and injected SSH keys",
        ),
        (
            script::NAME,
            "provision from an executable script; verify the spawned service unit is active",
        ),
    ]
}

/// Run a scenario by name
pub fn run_named(
    name: &str,
    config: &HarnessConfig,
    host: &dyn StateReader,
) -> Result<ScenarioReport> {
    match name {
        cloud_config::NAME => Ok(cloud_config::run(config, host)),
        script::NAME => Ok(script::run(config, host)),
        other => Err(Error::UnknownScenario(other.to_string())),
    }
}

/// Print the scenario banner
fn banner(name: &str) {
    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        name.white().bold()
    );
}

/// Assemble the report from accumulated checks and the fatal outcome,
/// printing the verdict
fn finish(name: &str, checker: Checker, outcome: Result<()>) -> ScenarioReport {
    let error = outcome.err().map(|e| e.to_string());
    if let Some(e) = &error {
        println!("  {} {}", "✗".red(), e);
    }

    let checks_run = checker.run_count();
    let failures = checker.into_failures();
    let passed = error.is_none() && failures.is_empty();

    if passed {
        println!("{} {}", "✓".green().bold(), "Scenario Passed".green().bold());
    } else {
        println!("{} {}", "✗".red().bold(), "Scenario Failed".red().bold());
    }

    ScenarioReport {
        name: name.to_string(),
        passed,
        checks_run,
        failures,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::MemReader;

    #[test]
    fn unknown_scenario_name_is_rejected() {
        let err = run_named("reboot", &HarnessConfig::default(), &MemReader::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownScenario(_)));
    }

    #[test]
    fn catalog_names_resolve() {
        for (name, _) in catalog() {
            assert!(matches!(*name, cloud_config::NAME | script::NAME));
        }
    }

    #[test]
    fn report_fails_when_checks_failed() {
        let mut checker = Checker::new();
        checker.expect_eq("artifact", "a", "b");
        let report = finish("cloud-config", checker, Ok(()));

        assert!(!report.passed);
        assert!(report.error.is_none());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn report_fails_on_fatal_error_with_clean_checks() {
        let report = finish(
            "script",
            Checker::new(),
            Err(Error::CommandNotFound("systemctl".to_string())),
        );

        assert!(!report.passed);
        assert!(report.error.unwrap().contains("systemctl"));
    }

    #[test]
    fn report_passes_when_clean_and_no_error() {
        let mut checker = Checker::new();
        checker.expect_eq("artifact", "a", "a");
        let report = finish("cloud-config", checker, Ok(()));

        assert!(report.passed);
        assert_eq!(report.checks_run, 1);
    }
}
