//! Assertion layer
//!
//! Assertion mismatches are non-fatal: the checker records them and the
//! scenario keeps checking, so a single run reports every divergence it
//! can observe. Two comparison modes are supported: exact equality for
//! single-valued artifacts, substring containment for composite ones.

use colored::Colorize;

/// Longest observed-value preview embedded in a mismatch diagnostic
const PREVIEW_CHARS: usize = 200;

/// Accumulates assertion outcomes for one scenario
#[derive(Default)]
pub struct Checker {
    run: usize,
    failures: Vec<String>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert exact, case-sensitive equality
    pub fn expect_eq(&mut self, what: &str, expected: &str, actual: &str) {
        if actual == expected {
            self.pass(what);
        } else {
            self.fail(
                what,
                format!("expected '{}', got '{}'", expected, preview(actual)),
            );
        }
    }

    /// Assert the haystack contains the needle
    pub fn expect_contains(&mut self, what: &str, haystack: &str, needle: &str) {
        if haystack.contains(needle) {
            self.pass(what);
        } else {
            self.fail(
                what,
                format!(
                    "expected to contain '{}', got '{}'",
                    needle,
                    preview(haystack)
                ),
            );
        }
    }

    /// Record a failure detected outside a comparison, e.g. an unreadable
    /// optional artifact
    pub fn fail(&mut self, what: &str, detail: impl std::fmt::Display) {
        self.run += 1;
        let message = format!("{what}: {detail}");
        println!("  {} {}", "✗".red(), message);
        self.failures.push(message);
    }

    fn pass(&mut self, what: &str) {
        self.run += 1;
        println!("  {} {}", "✓".green(), what.dimmed());
    }

    /// Number of checks run so far
    pub fn run_count(&self) -> usize {
        self.run
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

/// Bound a value for embedding in a diagnostic, on a char boundary
fn preview(value: &str) -> String {
    if value.chars().count() > PREVIEW_CHARS {
        let cut: String = value.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_checks_leave_checker_clean() {
        let mut checker = Checker::new();
        checker.expect_eq("bootstrap file", "url", "url");
        checker.expect_contains("authorized_keys", "line one\nline two\n", "line two");

        assert!(checker.is_clean());
        assert_eq!(checker.run_count(), 2);
    }

    #[test]
    fn mismatches_accumulate_without_aborting() {
        let mut checker = Checker::new();
        checker.expect_eq("bootstrap file", "expected-url", "other-url");
        checker.expect_contains("authorized_keys", "no keys here", "ssh-rsa AAAA");
        checker.expect_eq("unit state", "active", "active");

        assert!(!checker.is_clean());
        assert_eq!(checker.run_count(), 3);
        assert_eq!(checker.failures().len(), 2);
        assert!(checker.failures()[0].contains("expected-url"));
        assert!(checker.failures()[1].contains("ssh-rsa AAAA"));
    }

    #[test]
    fn equality_is_case_sensitive_and_exact() {
        let mut checker = Checker::new();
        checker.expect_eq("bootstrap file", "https://a", "https://A");
        checker.expect_eq("bootstrap file", "https://a", "https://a\n");

        assert_eq!(checker.failures().len(), 2);
    }

    #[test]
    fn long_observed_values_are_truncated() {
        let mut checker = Checker::new();
        let long = "x".repeat(500);
        checker.expect_eq("artifact", "short", &long);

        let failure = &checker.failures()[0];
        assert!(failure.contains("..."));
        assert!(failure.len() < 300);
    }

    #[test]
    fn recorded_failures_carry_their_subject() {
        let mut checker = Checker::new();
        checker.fail("etcd bootstrap file", "expected artifact was not produced");

        assert_eq!(checker.into_failures(), vec![
            "etcd bootstrap file: expected artifact was not produced".to_string()
        ]);
    }
}
