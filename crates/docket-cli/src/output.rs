//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use docket_domain::{
    DuplicateMarker, ReadinessSignal, Severity, SimilaritySignal, Suggestion, SuggestionPriority,
    TriageRecord,
};
use colored::*;
use serde::Serialize;
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

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Serialize any value as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a similarity score with its sub-scores.
    pub fn format_score(&self, score: u8, edit: u8, ngram: u8, word: u8) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(&serde_json::json!({
                "score": score,
                "edit": edit,
                "ngram": ngram,
                "word": word,
            })),
            OutputFormat::Quiet => Ok(score.to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Score", "Edit", "N-gram", "Word"]);
                builder.push_record([
                    score.to_string(),
                    edit.to_string(),
                    ngram.to_string(),
                    word.to_string(),
                ]);
                Ok(self.render(builder))
            }
        }
    }

    /// Format ranked duplicate candidates.
    pub fn format_signals(&self, signals: &[SimilaritySignal]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(signals),
            OutputFormat::Quiet => Ok(signals
                .iter()
                .map(|s| format!("{}\t{}", s.candidate_id, s.score))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if signals.is_empty() {
                    return Ok(self.colorize("No similar demands found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Score", "Title pts", "Desc pts", "Type", "Product"]);
                for signal in signals {
                    let breakdown = signal.breakdown.unwrap_or_default();
                    builder.push_record([
                        signal.candidate_id.clone(),
                        signal.candidate_title.clone(),
                        signal.score.to_string(),
                        format!("{:.1}", breakdown.title),
                        format!("{:.1}", breakdown.description),
                        format!("{:.1}", breakdown.type_match),
                        format!("{:.1}", breakdown.product_match),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format duplicate markers.
    pub fn format_markers<'a, I>(&self, markers: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a DuplicateMarker>,
    {
        let markers: Vec<&DuplicateMarker> = markers.into_iter().collect();
        match self.format {
            OutputFormat::Json => self.json(&markers),
            OutputFormat::Quiet => Ok(markers
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if markers.is_empty() {
                    return Ok(self.success("No duplicate markers found"));
                }
                Ok(markers
                    .iter()
                    .map(|m| self.warning(m.as_str()))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    /// Format readiness signals.
    pub fn format_readiness(&self, signals: &[ReadinessSignal]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(signals),
            OutputFormat::Quiet => Ok(signals
                .iter()
                .map(|s| self.json(&s.kind).map(|k| k.trim_matches('"').to_string()))
                .collect::<Result<Vec<_>>>()?
                .join("\n")),
            OutputFormat::Table => Ok(signals
                .iter()
                .map(|s| {
                    let line = format!("{}: {}", s.title, s.description);
                    match s.severity {
                        Severity::Danger => self.error(&line),
                        Severity::Warning => self.warning(&line),
                        Severity::Success => self.success(&line),
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a triage record.
    pub fn format_record(&self, record: &TriageRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(record),
            OutputFormat::Quiet => Ok(record.id.to_string()),
            OutputFormat::Table => {
                let progress = record.checklist_progress();
                let mut out = vec![
                    format!("Triage {} (demand {})", record.id, record.demand_id),
                    format!("Status: {}", record.status),
                    format!(
                        "Ratings: impact={} urgency={} complexity={}",
                        rating_label(record.impact.map(|r| r.level.as_str())),
                        rating_label(record.urgency.map(|r| r.level.as_str())),
                        rating_label(record.complexity.map(|r| r.level.as_str())),
                    ),
                    format!(
                        "Checklist: {}/{} done, {}/{} required",
                        progress.completed, progress.total, progress.required_completed, progress.required_total
                    ),
                ];
                if let Some(user) = &record.triaged_by {
                    out.push(format!("Triaged by: {}", user));
                }

                let mut builder = Builder::default();
                builder.push_record(["", "Item", "Label", "Required"]);
                for item in &record.checklist {
                    builder.push_record([
                        if item.completed { "✓" } else { " " }.to_string(),
                        item.id.clone(),
                        item.label.clone(),
                        if item.required { "yes" } else { "no" }.to_string(),
                    ]);
                }
                out.push(self.render(builder));

                let readiness = if record.is_ready_for_discovery() {
                    self.success("Ready for discovery")
                } else {
                    self.info("Not yet ready for discovery")
                };
                out.push(readiness);
                Ok(out.join("\n"))
            }
        }
    }

    /// Format suggestions.
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.json(suggestions),
            OutputFormat::Quiet => Ok(suggestions
                .iter()
                .map(|s| s.title.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    return Ok(self.info("No suggestions"));
                }
                let mut lines = Vec::new();
                for suggestion in suggestions {
                    let header = format!("[{}] {}", priority_label(suggestion.priority), suggestion.title);
                    lines.push(match suggestion.priority {
                        SuggestionPriority::High => self.colorize(&header, "red"),
                        SuggestionPriority::Medium => self.colorize(&header, "yellow"),
                        SuggestionPriority::Low => self.colorize(&header, "cyan"),
                    });
                    lines.push(format!("    {}", suggestion.description));
                    for related in &suggestion.related {
                        lines.push(format!("    - {} {} ({})", related.id, related.title, related.annotation));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn rating_label(level: Option<&str>) -> &str {
    level.unwrap_or("-")
}

fn priority_label(priority: SuggestionPriority) -> &'static str {
    match priority {
        SuggestionPriority::High => "HIGH",
        SuggestionPriority::Medium => "MEDIUM",
        SuggestionPriority::Low => "LOW",
    }
}
