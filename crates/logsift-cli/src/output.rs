//! Output formatting for the CLI.

use crate::commands::extract::FileReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use logsift_domain::Chunk;
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

    /// Format extraction reports, one section per input.
    pub fn format_reports(&self, reports: &[FileReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Table => Ok(self.format_reports_table(reports)),
            OutputFormat::Quiet => Ok(self.format_reports_quiet(reports)),
        }
    }

    fn format_reports_table(&self, reports: &[FileReport]) -> String {
        reports
            .iter()
            .map(|report| {
                let header = self.colorize(&format!("==> {} <==", report.source), "cyan");
                let summary = self.info(&format!(
                    "{} pattern(s) from {} chunk(s), {} line(s)",
                    report.patterns.len(),
                    report.metadata.total_chunks,
                    report.metadata.total_lines
                ));

                if report.patterns.is_empty() {
                    return format!("{}\n{}", header, self.colorize("No patterns found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Line", "Length", "Chunk"]);
                for pattern in &report.patterns {
                    builder.push_record([
                        pattern.line_number.to_string(),
                        pattern.chunk_length.to_string(),
                        pattern.chunk.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                format!("{}\n{}\n{}", header, summary, table)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// `line<TAB>chunk`, prefixed with the source when there are several.
    fn format_reports_quiet(&self, reports: &[FileReport]) -> String {
        let prefix_source = reports.len() > 1;
        reports
            .iter()
            .flat_map(|report| {
                report.patterns.iter().map(move |pattern| {
                    if prefix_source {
                        format!("{}:{}\t{}", report.source, pattern.line_number, pattern.chunk)
                    } else {
                        format!("{}\t{}", pattern.line_number, pattern.chunk)
                    }
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the raw chunk partition of one input.
    pub fn format_chunks(&self, source: &str, chunks: &[Chunk<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json_chunks: Vec<serde_json::Value> = chunks
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "line_number": c.start_line,
                            "lines": c.newline_count().max(1),
                            "length": c.char_len(),
                            "text": c.text,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "source": source,
                    "chunks": json_chunks,
                }))?)
            }
            OutputFormat::Table => Ok(self.format_chunks_table(source, chunks)),
            OutputFormat::Quiet => Ok(chunks
                .iter()
                .map(|c| c.start_line.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_chunks_table(&self, source: &str, chunks: &[Chunk<'_>]) -> String {
        let header = self.colorize(&format!("==> {} <==", source), "cyan");
        if chunks.is_empty() {
            return format!("{}\n{}", header, self.colorize("No chunks found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Line", "Lines", "Length", "Text"]);
        for chunk in chunks {
            builder.push_record([
                chunk.start_line.to_string(),
                chunk.newline_count().max(1).to_string(),
                chunk.char_len().to_string(),
                // Escaped so continuation newlines stay visible in one row
                chunk.text.escape_debug().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", header, table)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
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
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
