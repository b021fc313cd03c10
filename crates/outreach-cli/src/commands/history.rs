//! History command implementation.

use crate::cli::HistoryArgs;
use crate::error::Result;
use crate::output::Formatter;
use outreach_domain::traits::RequestLog;
use outreach_store::JsonlLog;

/// Execute the history command.
pub fn execute_history(
    args: HistoryArgs,
    log: &JsonlLog,
    default_limit: usize,
    formatter: &Formatter,
) -> Result<()> {
    let limit = args.limit.unwrap_or(default_limit);
    let entries = log.recent(limit)?;
    println!("{}", formatter.format_history(&entries)?);
    Ok(())
}
