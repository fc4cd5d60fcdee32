use crate::github::pull::PullRequestRecord;
use std::io::{self, Write};

pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        tracing::error!("failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Renders records as two-space indented JSON. No records render as `[]`.
pub fn format_records(records: &[PullRequestRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
