//! Scan configuration

/// Options controlling one directory scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Leave `*_test.go` files out of the forest
    pub skip_tests: bool,
    /// Treat any file that fails to parse as a failed run
    pub strict: bool,
}

impl ScanConfig {
    /// Whether a run with `error_count` parse errors should fail
    pub fn should_fail(&self, error_count: usize) -> bool {
        self.strict && error_count > 0
    }
}
