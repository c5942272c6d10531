//! Script provisioning scenario
//!
//! Feeds the tool an executable user-data script and verifies it was
//! wrapped in a service unit that is running. The script sleeps so the
//! unit is observably active when the status query runs; the query happens
//! immediately after invocation, well inside that window.

use crate::common::{HarnessConfig, Result};
use crate::harness::{fixture, invoke, Checker, CleanupStack, StateReader};

use super::ScenarioReport;

pub const NAME: &str = "script";

/// Status output marker the service manager prints for a running unit
const ACTIVE_MARKER: &str = "Active: active";

const USER_DATA_SCRIPT: &str = "#!/bin/bash
/bin/sleep 10
";

/// Run the scenario against the configured host
pub fn run(config: &HarnessConfig, host: &dyn StateReader) -> ScenarioReport {
    super::banner(NAME);

    let mut checker = Checker::new();
    let outcome = {
        let mut cleanup = CleanupStack::new();
        exercise(config, host, &mut checker, &mut cleanup)
    };
    super::finish(NAME, checker, outcome)
}

fn exercise(
    config: &HarnessConfig,
    host: &dyn StateReader,
    checker: &mut Checker,
    cleanup: &mut CleanupStack,
) -> Result<()> {
    let fixture_path = config.paths.fixture_dir.join("user-data-script");
    fixture::write(&fixture_path, USER_DATA_SCRIPT)?;
    cleanup.defer("remove script fixture", {
        let path = fixture_path.clone();
        move || fixture::remove(&path)
    });

    let tool = config.tool_command()?;
    let fixture_arg = fixture_path.display().to_string();
    invoke::run_checked(&tool, &["--from-file", &fixture_arg])?;

    // The tool records the generated unit name in its workspace; without it
    // there is nothing to query or stop
    let unit_file = config.paths.workspace.join("scripts").join("unit-name");
    let unit_name = host.read_to_string(&unit_file)?.trim_end().to_string();

    cleanup.defer("stop user-data unit", {
        let service_manager = config.host.service_manager.clone();
        let unit = unit_name.clone();
        move || invoke::run_checked(&service_manager, &["stop", &unit]).map(drop)
    });

    let status = invoke::run_checked(&config.host.service_manager, &["status", &unit_name])?;
    checker.expect_contains("user-data unit status", &status.stdout, ACTIVE_MARKER);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_is_an_interpreter_directive_script() {
        assert!(USER_DATA_SCRIPT.starts_with("#!"));
    }

    #[test]
    fn script_sleeps_long_enough_to_be_observed() {
        assert!(USER_DATA_SCRIPT.contains("sleep 10"));
    }
}
