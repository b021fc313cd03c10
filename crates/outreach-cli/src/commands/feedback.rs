//! Feedback command implementation.

use crate::cli::FeedbackArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use outreach_domain::traits::RequestLog;
use outreach_domain::EntryId;
use outreach_store::JsonlLog;
use std::fs;
use std::io::{self, Read};

/// Execute the feedback command.
pub fn execute_feedback(args: FeedbackArgs, log: &JsonlLog, formatter: &Formatter) -> Result<()> {
    let text = read_text(&args)?;
    let id = EntryId::from_string(&args.id).map_err(CliError::InvalidInput)?;
    let slot = usize::from(args.slot);

    if !log.attach_feedback(&id, slot - 1, &text)? {
        return Err(CliError::NotFound(format!("No log entry with ID '{}'", id)));
    }

    println!(
        "{}",
        formatter.success(&format!("Recorded sent text for email {} of {}", slot, id))
    );
    Ok(())
}

/// The sent text from exactly one source: argument, file or stdin.
fn read_text(args: &FeedbackArgs) -> Result<String> {
    let sources = [args.text.is_some(), args.file.is_some(), args.stdin]
        .iter()
        .filter(|s| **s)
        .count();
    if sources != 1 {
        return Err(CliError::InvalidInput(
            "Provide the sent text as an argument, with --file, or with --stdin".to_string(),
        ));
    }

    let text = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = &args.file {
        fs::read_to_string(path)?
    } else {
        args.text.clone().unwrap_or_default()
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(CliError::InvalidInput("Sent text is empty".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use outreach_domain::{EffortLevel, InputSnapshot, LogEntry, OutputSnapshot, ProspectQuery};
    use tempfile::TempDir;

    fn feedback(id: &str, slot: u8, text: Option<&str>) -> FeedbackArgs {
        FeedbackArgs {
            id: id.to_string(),
            slot,
            text: text.map(str::to_string),
            file: None,
            stdin: false,
        }
    }

    fn seeded_log(dir: &TempDir) -> (JsonlLog, EntryId) {
        let log = JsonlLog::new(dir.path().join("log.jsonl"));
        let query = ProspectQuery::new("Jane").with_company_website("acme.example");
        let entry = LogEntry::new(
            InputSnapshot::capture(&query, 200, EffortLevel::Low),
            OutputSnapshot::default(),
        );
        let id = log.append(&entry).unwrap();
        (log, id)
    }

    #[test]
    fn test_feedback_attached_to_one_based_slot() {
        let dir = TempDir::new().unwrap();
        let (log, id) = seeded_log(&dir);
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_feedback(feedback(id.as_str(), 2, Some("Hi there")), &log, &formatter).unwrap();

        let entry = log.recent(1).unwrap().remove(0);
        assert_eq!(entry.feedback.emails_actually_sent[1].as_deref(), Some("Hi there"));
        assert!(entry.feedback.emails_actually_sent[0].is_none());
    }

    #[test]
    fn test_feedback_from_file() {
        let dir = TempDir::new().unwrap();
        let (log, id) = seeded_log(&dir);
        let path = dir.path().join("sent.txt");
        fs::write(&path, "Subject: Hello\n\nBody\n").unwrap();

        let mut args = feedback(id.as_str(), 3, None);
        args.file = Some(path);
        execute_feedback(args, &log, &Formatter::new(OutputFormat::Quiet, false)).unwrap();

        let entry = log.recent(1).unwrap().remove(0);
        assert_eq!(entry.feedback.emails_actually_sent[2].as_deref(), Some("Subject: Hello\n\nBody"));
    }

    #[test]
    fn test_unknown_id() {
        let dir = TempDir::new().unwrap();
        let (log, _) = seeded_log(&dir);
        let result = execute_feedback(
            feedback("19990101_000000_000000_00000000", 1, Some("text")),
            &log,
            &Formatter::new(OutputFormat::Table, false),
        );
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }

    #[test]
    fn test_text_source_required() {
        assert!(matches!(read_text(&feedback("id", 1, None)), Err(CliError::InvalidInput(_))));

        let mut both = feedback("id", 1, Some("text"));
        both.stdin = true;
        assert!(matches!(read_text(&both), Err(CliError::InvalidInput(_))));

        assert!(matches!(read_text(&feedback("id", 1, Some("   "))), Err(CliError::InvalidInput(_))));
    }
}
