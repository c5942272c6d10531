//! Cloud-config provisioning scenario
//!
//! Feeds the tool a cloud-config document carrying an etcd discovery URL
//! and two SSH public keys, then verifies the discovery bootstrap file
//! matches the URL exactly and the authorized-keys store contains both
//! keys. Keys are registered under the configured scope so cleanup can
//! deregister them in bulk.

use crate::common::{HarnessConfig, Result};
use crate::harness::{fixture, invoke, Checker, CleanupStack, StateReader};

use super::ScenarioReport;

pub const NAME: &str = "cloud-config";

/// Discovery URL the bootstrap artifact must reproduce byte-for-byte
pub const DISCOVERY_URL: &str =
    "https://discovery.etcd.io/827c73219eeb2fa5530027c37bf18877";

pub const KEY_ONE: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC5LaGMGRqZEEvOhHlIEiQgdMJIQ9Qe8L/XSz06GqzcESbEnYLIXar2nou4eW4AGMVC1V0BrcWWnSTxM1/dWeCLOUt5NulKAjtdBUZGhCT83nbimSzbmx3/q2y5bCiS4Zr8ZjYFbi1eLvye2jKPE4xo7cvIfDKc0ztQ9kU7JknUdKNZo3RKXr5EPhJ5UZ8Ff15CI9+hDSvdPwer+HNnEt/psRVC+s29EwNGwUXD4IYqrk3X4ew0YAl/oULHM4cctoBW9GM+kAl40rOuIARlKfe4UdCgDMHYA/whi7Us+cPNgPit9IVJVBU4eo/cF5molD2l+PMSntypuv79obu8sA1H verify-key-one";

pub const KEY_TWO: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCZw5Ljtt9wlEfyDvmUwu/BeMcIhVarbcM4ajZolxRy9G8vvCa7ODcSjzSyhfG1mLSBB2KfaFFI6zGHBjFX0Gzy9i8m3u7PnZBPX30bb1n0hJCrUhpqUGQUe8OFdoBstf1HIwJU/KoTBL0Ap1WEn0quRT4kNgBLbPrMjYCPbS1q4wJKdIE5rRm/EfTUrmIb0i91gujEGw5oUHDXf0X+/cxwwIVZh1z16YhOgvJBzXhsJ9a0w7kcy/6wPRv03yyMg/r2Ada6ci68LulKz5GLn+xInT0bvIcra/PZ7WE+jyZhZKly239VZyT/1dHkBbTw+kgnGobLMbjOOg5bKaT8NZJ3 verify-key-two";

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
    let fixture_path = config.paths.fixture_dir.join("user-data-cloud-config");
    fixture::write(&fixture_path, &user_data())?;
    cleanup.defer("remove cloud-config fixture", {
        let path = fixture_path.clone();
        move || fixture::remove(&path)
    });

    let tool = config.tool_command()?;
    let fixture_arg = fixture_path.display().to_string();
    invoke::run_checked(
        &tool,
        &[
            "--from-file",
            &fixture_arg,
            "--ssh-key-name",
            &config.tool.key_scope,
        ],
    )?;

    // Keys exist under the scope only once the tool has run
    cleanup.defer("deregister injected keys", {
        let key_tool = config.host.ssh_key_tool.clone();
        let scope = config.tool.key_scope.clone();
        move || invoke::run_checked(&key_tool, &["-d", &scope]).map(drop)
    });

    match host.read_to_string(&config.paths.bootstrap_file) {
        Ok(contents) => checker.expect_eq("etcd bootstrap file", DISCOVERY_URL, &contents),
        Err(e) => checker.fail("etcd bootstrap file", e),
    }

    let authorized_keys = host.read_to_string(&config.paths.authorized_keys)?;
    checker.expect_contains("authorized_keys: first key", &authorized_keys, KEY_ONE);
    checker.expect_contains("authorized_keys: second key", &authorized_keys, KEY_TWO);

    Ok(())
}

/// The user-data document fed to the tool
fn user_data() -> String {
    format!(
        "#cloud-config
coreos:
    etcd:
        discovery_url: {DISCOVERY_URL}
ssh_authorized_keys:
    - {KEY_ONE}
    - {KEY_TWO}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_starts_with_the_marker_line() {
        assert!(user_data().starts_with("#cloud-config\n"));
    }

    #[test]
    fn user_data_carries_url_and_both_keys() {
        let doc = user_data();
        assert!(doc.contains(DISCOVERY_URL));
        assert!(doc.contains(KEY_ONE));
        assert!(doc.contains(KEY_TWO));
    }

    #[test]
    fn the_two_keys_are_distinct() {
        assert_ne!(KEY_ONE, KEY_TWO);
    }
}
