//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use outreach_domain::{Angle, LogEntry, FEEDBACK_SLOTS};
use outreach_generator::{LogOutcome, OutreachResult, MAX_EMAILS};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a generation result.
    pub fn format_generation(&self, result: &OutreachResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_generation_json(result),
            OutputFormat::Table => Ok(self.format_generation_text(result)),
            OutputFormat::Quiet => Ok(result
                .log
                .entry_id()
                .map(|id| id.to_string())
                .unwrap_or_default()),
        }
    }

    fn format_generation_json(&self, result: &OutreachResult) -> Result<String> {
        let emails: Vec<serde_json::Value> = result
            .emails
            .iter()
            .enumerate()
            .map(|(i, email)| {
                serde_json::json!({
                    "angle": Angle::for_index(i).map(|a| a.as_str()),
                    "subject": email.subject,
                    "body": email.body,
                })
            })
            .collect();

        let (entry_id, log_error) = match &result.log {
            LogOutcome::Recorded(id) => (Some(id.to_string()), None),
            LogOutcome::Failed(e) => (None, Some(e.clone())),
        };

        let value = serde_json::json!({
            "entry_id": entry_id,
            "log_error": log_error,
            "model": result.model,
            "emails": emails,
            "resources": result.resources,
            "token_usage": result.token_usage,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_generation_text(&self, result: &OutreachResult) -> String {
        let mut out = String::new();

        if result.emails.is_empty() {
            out.push_str(&self.warning("The model returned no recognizable emails."));
            out.push('\n');
        }

        for (i, email) in result.emails.iter().enumerate() {
            let angle = Angle::for_index(i).map(|a| a.as_str()).unwrap_or("extra");
            let heading = format!("EMAIL {} - {} ANGLE", i + 1, angle.to_uppercase());
            out.push_str(&self.colorize(&heading, "cyan"));
            out.push_str("\n\n");
            out.push_str(&email.to_plain_text());
            out.push_str("\n\n");
        }

        if !result.is_complete() && !result.emails.is_empty() {
            out.push_str(&self.warning(&format!(
                "Only {} of {} emails could be parsed.",
                result.emails.len(),
                MAX_EMAILS
            )));
            out.push_str("\n\n");
        }

        if !result.resources.is_empty() {
            out.push_str(&self.colorize("RESEARCH SOURCES", "cyan"));
            out.push('\n');
            for (i, resource) in result.resources.iter().enumerate() {
                if resource.title == resource.url {
                    out.push_str(&format!("{}. {}\n", i + 1, resource.url));
                } else {
                    out.push_str(&format!("{}. {} - {}\n", i + 1, resource.title, resource.url));
                }
            }
            out.push('\n');
        }

        let usage = result.token_usage;
        let mut builder = Builder::default();
        builder.push_record(["Input tokens", "Output tokens", "Total tokens"]);
        builder.push_record([
            usage.input.to_string(),
            usage.output.to_string(),
            usage.total.to_string(),
        ]);
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        out.push_str(&table.to_string());
        out.push('\n');

        match &result.log {
            LogOutcome::Recorded(id) => out.push_str(&self.info(&format!("Entry ID: {}", id))),
            LogOutcome::Failed(e) => {
                out.push_str(&self.warning(&format!("Request was not logged: {}", e)))
            }
        }

        out
    }

    /// Format log entries.
    pub fn format_history(&self, entries: &[LogEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => Ok(self.format_history_table(entries)),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_history_table(&self, entries: &[LogEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No requests logged yet.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Time (UTC)", "Prospect", "Effort", "Emails", "Tokens", "Feedback"]);

        for entry in entries {
            builder.push_record([
                entry.id.to_string(),
                entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                entry.inputs.person_name.clone(),
                entry.inputs.thinking_level.to_string(),
                entry.outputs.generated_emails.len().to_string(),
                entry.outputs.token_usage.total.to_string(),
                format!("{}/{}", entry.feedback.filled(), FEEDBACK_SLOTS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}
