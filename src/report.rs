/*!
 * Reporting functionality for paper-export
 *
 * Renders a summary of a migration run as console tables using the tabled
 * library.
 */

use std::time::Duration;

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::pipeline::MigrationStats;
use crate::utils::format_file_size;

/// Summary of one migration run
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Remote folder that was walked
    pub source_folder: String,
    /// Local output root
    pub output_dir: String,
    /// When the run started
    pub started: DateTime<Local>,
    /// Wall-clock time of the run
    pub duration: Duration,
    /// Totals collected by the pipeline
    pub stats: MigrationStats,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for migration results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &MigrationReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &MigrationReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &MigrationReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let source = if report.source_folder.is_empty() {
            "/".to_string()
        } else {
            report.source_folder.clone()
        };

        let rows = vec![
            SummaryRow {
                key: "📂 Source Folder",
                value: source,
            },
            SummaryRow {
                key: "💾 Output Directory",
                value: report.output_dir.clone(),
            },
            SummaryRow {
                key: "🕒 Started",
                value: report.started.to_rfc3339(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📑 Pages Listed",
                value: report.stats.pages.to_string(),
            },
            SummaryRow {
                key: "✅ Exported",
                value: report.stats.exported.to_string(),
            },
            SummaryRow {
                key: "⏭️ Skipped",
                value: report.stats.skipped.to_string(),
            },
            SummaryRow {
                key: "🗂️ Other Entries",
                value: report.stats.ignored.to_string(),
            },
            SummaryRow {
                key: "♻️ Overwritten",
                value: report.stats.overwritten.to_string(),
            },
            SummaryRow {
                key: "❌ Failed",
                value: report.stats.failed.len().to_string(),
            },
            SummaryRow {
                key: "📦 Written",
                value: format_file_size(report.stats.bytes_written),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_failures_table(&self, report: &MigrationReport) -> String {
        #[derive(Tabled)]
        struct FailureRow {
            #[tabled(rename = "Document")]
            path: String,

            #[tabled(rename = "Error")]
            error: String,
        }

        let rows: Vec<FailureRow> = report
            .stats
            .failed
            .iter()
            .map(|f| FailureRow {
                path: f.path.clone(),
                error: f.error.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &MigrationReport) -> String {
        let summary = format!("✅  EXPORT COMPLETE\n{}", self.create_summary_table(report));

        if report.stats.failed.is_empty() {
            return summary;
        }

        format!(
            "⚠️  FAILED DOCUMENTS\n{}\n\n{}",
            self.create_failures_table(report),
            summary
        )
    }
}
