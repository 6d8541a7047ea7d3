//! Per-run outcome tally.

/// Counters accumulated over one reconciliation run.
///
/// Created at the start of a run, mutated only while packages are
/// checked (phase 3), returned by value, then discarded. Installer
/// setup and authentication results are deliberately NOT reflected
/// here: only package checks decide the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Packages that met their requirement, before or after remediation.
    pub successes: u32,

    /// Packages whose remediation failed.
    pub failures: u32,

    /// Remediations that ran and exited zero.
    pub installs: u32,
}

impl RunOutcome {
    /// Overall verdict: no package remediation failed.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// Packages that were conclusively evaluated. Packages with
    /// unparsable version output are in neither counter and so not in
    /// the total.
    pub fn total(&self) -> u32 {
        self.successes + self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_outcome_passes() {
        let outcome = RunOutcome::default();
        assert!(outcome.passed());
        assert_eq!(outcome.total(), 0);
    }

    #[test]
    fn any_failure_fails_the_run() {
        let outcome = RunOutcome {
            successes: 9,
            failures: 1,
            installs: 2,
        };
        assert!(!outcome.passed());
        assert_eq!(outcome.total(), 10);
    }

    #[test]
    fn installs_do_not_affect_verdict() {
        let outcome = RunOutcome {
            successes: 1,
            failures: 0,
            installs: 1,
        };
        assert!(outcome.passed());
    }
}
