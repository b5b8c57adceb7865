//! status command - Report the environment mode and its health

use crate::engine::{self, Context, Severity, StatusReport};
use crate::git::GitCli;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Print the status report; fail if any check did not pass.
pub fn status(ctx: &Context, json: bool) -> Result<()> {
    let report = engine::status(ctx, &GitCli::new());

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize status report")?;
        println!("{}", rendered);
    } else {
        print_report(ctx, &report);
    }

    if !report.is_healthy() {
        bail!("Detected one or more issues.");
    }
    Ok(())
}

fn print_report(ctx: &Context, report: &StatusReport) {
    output::print(format!("Mode: {}", report.mode), ctx.verbosity);

    for finding in &report.findings {
        let line = match finding.severity {
            Severity::Ok => output::format_ok(&finding.message),
            Severity::Issue => output::format_issue(&finding.message),
        };
        // Issues are shown even in quiet mode.
        if finding.is_issue() {
            println!("{}", line);
        } else {
            output::print(line, ctx.verbosity);
        }
    }

    for note in &report.notes {
        output::print(format!("  {}", note), ctx.verbosity);
    }
}
