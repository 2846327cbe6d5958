use std::fmt;

use super::InventoryRecord;

/// Terminal failure for one address once its retries are exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    pub address: String,
    pub reason: String,
}

impl SweepFailure {
    pub fn new(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SweepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.reason)
    }
}

/// Everything a sweep produced. `records` follow the input address order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub records: Vec<InventoryRecord>,
    pub failures: Vec<SweepFailure>,
}

impl SweepResult {
    /// Number of addresses accounted for.
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_displays_as_log_line() {
        let failure = SweepFailure::new("10.0.0.2", "StatusCode 404 Not Found");
        assert_eq!(failure.to_string(), "10.0.0.2: StatusCode 404 Not Found");
    }

    #[test]
    fn total_counts_both_sides() {
        let result = SweepResult {
            records: vec![InventoryRecord::new("10.0.0.1")],
            failures: vec![SweepFailure::new("10.0.0.2", "timed out")],
        };
        assert_eq!(result.total(), 2);
        assert!(result.has_failures());
        assert!(!SweepResult::default().has_failures());
    }
}
