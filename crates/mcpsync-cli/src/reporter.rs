//! Console output for sync runs.

use std::io::Write;

use console::style;

use mcpsync_core::report::{Reporter, SyncReport, TargetOutcome};

/// Writes one styled line per target, in the order targets are synced.
pub struct ConsoleReporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        // A closed stdout must not abort the remaining targets.
        if let Err(err) = writeln!(self.writer, "{text}") {
            tracing::debug!(error = %err, "Failed to write console output");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn outcome(&mut self, target: &str, outcome: &TargetOutcome) {
        match outcome {
            TargetOutcome::Synced { path, mirrored } => {
                self.line(format_args!(
                    "{} {:<24} {}",
                    style("[ok]").green(),
                    target,
                    path.display()
                ));
                for legacy in mirrored {
                    self.line(format_args!(
                        "{} {:<24} {} (legacy)",
                        style("[ok]").green(),
                        target,
                        legacy.display()
                    ));
                }
            }
            TargetOutcome::Skipped { reason } => self.line(format_args!(
                "{} {:<24} {}",
                style("[skip]").dim(),
                target,
                style(reason).dim()
            )),
            TargetOutcome::Failed { reason } => self.line(format_args!(
                "{} {:<24} {}",
                style("[error]").red().bold(),
                target,
                reason
            )),
        }
    }

    fn warning(&mut self, target: &str, message: &str) {
        self.line(format_args!(
            "{} {:<24} {}",
            style("[warn]").yellow(),
            target,
            message
        ));
    }

    fn finished(&mut self, report: &SyncReport) {
        let summary = format!(
            "{} synced, {} skipped, {} failed",
            report.synced_count(),
            report.skipped_count(),
            report.failed_count()
        );
        let summary = if report.failed_count() > 0 {
            style(summary).red()
        } else {
            style(summary).bold()
        };
        self.line(format_args!("{summary}"));
    }
}
