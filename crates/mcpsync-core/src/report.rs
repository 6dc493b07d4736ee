//! Per-target outcomes and the sink they are reported to.

use std::fmt;
use std::path::PathBuf;

/// Result of syncing one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// File written; `mirrored` holds any legacy copies written alongside.
    Synced {
        path: PathBuf,
        mirrored: Vec<PathBuf>,
    },
    /// Nothing to do, typically because the tool is not installed.
    Skipped { reason: String },
    Failed { reason: String },
}

impl TargetOutcome {
    pub fn synced(path: PathBuf) -> Self {
        TargetOutcome::Synced {
            path,
            mirrored: Vec::new(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        TargetOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        TargetOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, TargetOutcome::Synced { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TargetOutcome::Failed { .. })
    }
}

impl fmt::Display for TargetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOutcome::Synced { path, mirrored } => {
                write!(f, "synced {}", path.display())?;
                for legacy in mirrored {
                    write!(f, " (mirrored to {})", legacy.display())?;
                }
                Ok(())
            }
            TargetOutcome::Skipped { reason } => write!(f, "skipped ({reason})"),
            TargetOutcome::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: String,
    pub outcome: TargetOutcome,
}

/// Everything a run produced, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub targets: Vec<TargetReport>,
}

impl SyncReport {
    pub fn push(&mut self, target: impl Into<String>, outcome: TargetOutcome) {
        self.targets.push(TargetReport {
            target: target.into(),
            outcome,
        });
    }

    pub fn get(&self, target: &str) -> Option<&TargetOutcome> {
        self.targets
            .iter()
            .find(|r| r.target == target)
            .map(|r| &r.outcome)
    }

    pub fn synced_count(&self) -> usize {
        self.targets.iter().filter(|r| r.outcome.is_synced()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.targets.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.targets.len() - self.synced_count() - self.failed_count()
    }
}

/// Sink for user-facing progress lines.
///
/// Adapters call [`Reporter::warning`] for soft failures (an unreadable
/// override, a broken backup) that do not stop the target from syncing.
pub trait Reporter {
    fn outcome(&mut self, target: &str, outcome: &TargetOutcome);

    fn warning(&mut self, target: &str, message: &str);

    fn finished(&mut self, _report: &SyncReport) {}
}

/// Routes everything to `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn outcome(&mut self, target: &str, outcome: &TargetOutcome) {
        match outcome {
            TargetOutcome::Failed { .. } => tracing::error!(target_id = target, "{outcome}"),
            _ => tracing::info!(target_id = target, "{outcome}"),
        }
    }

    fn warning(&mut self, target: &str, message: &str) {
        tracing::warn!(target_id = target, "{message}");
    }

    fn finished(&mut self, report: &SyncReport) {
        tracing::info!(
            synced = report.synced_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            "MCP config sync finished"
        );
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub outcomes: Vec<(String, TargetOutcome)>,
    pub warnings: Vec<(String, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings_for(&self, target: &str) -> Vec<&str> {
        self.warnings
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn outcome(&mut self, target: &str, outcome: &TargetOutcome) {
        self.outcomes.push((target.to_string(), outcome.clone()));
    }

    fn warning(&mut self, target: &str, message: &str) {
        self.warnings.push((target.to_string(), message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_outcomes() {
        let mut report = SyncReport::default();
        report.push("cursor", TargetOutcome::synced(PathBuf::from("/h/.config/cursor/mcp.json")));
        report.push("codex", TargetOutcome::skipped("file not found"));
        report.push("opencode", TargetOutcome::failed("boom"));

        assert_eq!(report.synced_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.get("opencode").is_some_and(TargetOutcome::is_failed));
        assert!(report.get("missing").is_none());
    }

    #[test]
    fn outcome_display_mentions_mirrors() {
        let outcome = TargetOutcome::Synced {
            path: PathBuf::from("/h/.config/cursor/mcp.json"),
            mirrored: vec![PathBuf::from("/h/.cursor/mcp.json")],
        };

        assert_eq!(
            outcome.to_string(),
            "synced /h/.config/cursor/mcp.json (mirrored to /h/.cursor/mcp.json)"
        );
        assert_eq!(TargetOutcome::skipped("file not found").to_string(), "skipped (file not found)");
    }

    #[test]
    fn memory_reporter_filters_warnings() {
        let mut reporter = MemoryReporter::new();
        reporter.warning("cursor", "invalid override");
        reporter.warning("codex", "other");

        assert_eq!(reporter.warnings_for("cursor"), vec!["invalid override"]);
    }
}
