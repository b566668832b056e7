use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored, human readable output
    Console,
    /// Machine readable JSON document
    Json,
    /// Markdown suitable for pasting into docs or PRs
    Markdown,
}

/// Output of a single command, rendered in any report format.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub passed: bool,
    #[serde(skip)]
    pub rows: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub data: Value,
}

impl Report {
    pub fn new(title: impl Into<String>, data: Value) -> Self {
        Self {
            title: title.into(),
            passed: true,
            rows: Vec::new(),
            notes: Vec::new(),
            data,
        }
    }

    #[must_use]
    pub fn row(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.rows.push((label.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub const fn failed(mut self) -> Self {
        self.passed = false;
        self
    }
}

pub fn render(out: &mut dyn Write, report: &Report, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Console => generate_console_report(out, report),
        ReportFormat::Json => generate_json_report(out, report),
        ReportFormat::Markdown => generate_markdown_report(out, report),
    }
}

pub fn generate_console_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!("📊 {}", report.title).bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(report.title.chars().count() + 3).cyan())?;

    let width = report
        .rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in &report.rows {
        writeln!(out, "{label:width$}  {}", value.bold())?;
    }

    if !report.notes.is_empty() {
        writeln!(out)?;
        for note in &report.notes {
            if report.passed {
                writeln!(out, "  • {note}")?;
            } else {
                writeln!(out, "  • {}", note.red())?;
            }
        }
    }

    let status = if report.passed {
        "✅ PASS".green()
    } else {
        "❌ FAIL".red()
    };
    writeln!(out)?;
    writeln!(out, "{status}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    let json_output = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &Report) -> Result<()> {
    let status = if report.passed { "✅" } else { "❌" };
    writeln!(out, "# {status} {}\n", report.title)?;

    if !report.rows.is_empty() {
        writeln!(out, "| Field | Value |")?;
        writeln!(out, "|-------|-------|")?;
        for (label, value) in &report.rows {
            writeln!(out, "| {label} | {value} |")?;
        }
        writeln!(out)?;
    }

    if !report.notes.is_empty() {
        writeln!(out, "## Notes\n")?;
        for note in &report.notes {
            writeln!(out, "- {note}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
