//! Report generation.
//!
//! Writes the legislators and bills CSV reports, the optional JSON run
//! summary, and the console summary text.

use crate::config::OutputConfig;
use crate::csv_io;
use crate::models::{RunSummary, TallyOutput};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Column headers of the legislators report.
pub const LEGISLATOR_HEADERS: [&str; 4] =
    ["id", "name", "num_supported_bills", "num_opposed_bills"];

/// Column headers of the bills report.
pub const BILL_HEADERS: [&str; 5] = [
    "id",
    "title",
    "supporter_count",
    "opposer_count",
    "primary_sponsor",
];

/// Write both CSV reports to the configured locations.
pub fn write_reports(output: &TallyOutput, config: &OutputConfig) -> Result<()> {
    info!("Saving output data files");

    csv_io::write_records(&config.legislators, &LEGISLATOR_HEADERS, &output.legislators)
        .context("Failed to write legislators report")?;
    csv_io::write_records(&config.bills, &BILL_HEADERS, &output.bills)
        .context("Failed to write bills report")?;

    info!("Output data files saved successfully");
    Ok(())
}

/// Generate the JSON run summary.
pub fn generate_json_summary(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

/// Write the JSON run summary to a file.
pub fn write_json_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let content = generate_json_summary(summary)?;

    csv_io::ensure_parent_dir(path)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;

    info!(path = %path.display(), "Run summary written");
    Ok(())
}

/// Generate a text summary of the run for the console.
pub fn generate_summary_text(summary: &RunSummary, config: &OutputConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "📊 Processed {} legislators",
        summary.legislators_written
    ));
    lines.push(format!("📋 Processed {} bills", summary.bills_written));

    if summary.has_skips() {
        lines.push(format!(
            "⚠️  Skipped {} vote results and {} bills with unknown votes",
            summary.skipped_results, summary.skipped_bills
        ));
    }

    lines.push(format!("   Legislators: {}", config.legislators.display()));
    lines.push(format!("   Bills: {}", config.bills.display()));
    if let Some(ref path) = config.summary {
        lines.push(format!("   Summary: {}", path.display()));
    }
    lines.push(format!("   Duration: {:.3}s", summary.duration_seconds));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillSupport, InputCounts, LegislatorSupport};
    use tempfile::TempDir;

    fn create_test_output() -> TallyOutput {
        TallyOutput {
            legislators: vec![
                LegislatorSupport {
                    id: "l1".to_string(),
                    name: "Alice".to_string(),
                    num_supported_bills: 1,
                    num_opposed_bills: 0,
                },
                LegislatorSupport {
                    id: "l2".to_string(),
                    name: "Bob".to_string(),
                    num_supported_bills: 0,
                    num_opposed_bills: 1,
                },
            ],
            bills: vec![BillSupport {
                id: "b1".to_string(),
                title: "T".to_string(),
                supporter_count: 1,
                opposer_count: 1,
                primary_sponsor: "Alice".to_string(),
            }],
            skipped_results: 0,
            skipped_bills: 1,
        }
    }

    fn output_config(dir: &Path) -> OutputConfig {
        let mut config = OutputConfig::default();
        config.rebase(dir);
        config
    }

    #[test]
    fn test_write_reports() {
        let dir = TempDir::new().unwrap();
        let config = output_config(&dir.path().join("out"));

        write_reports(&create_test_output(), &config).unwrap();

        let legislators = std::fs::read_to_string(&config.legislators).unwrap();
        assert_eq!(
            legislators,
            "id,name,num_supported_bills,num_opposed_bills\nl1,Alice,1,0\nl2,Bob,0,1\n"
        );

        let bills = std::fs::read_to_string(&config.bills).unwrap();
        assert_eq!(
            bills,
            "id,title,supporter_count,opposer_count,primary_sponsor\nb1,T,1,1,Alice\n"
        );
    }

    #[test]
    fn test_write_json_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary::new(InputCounts::default(), &create_test_output(), 0.25);

        write_json_summary(&summary, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["legislators_written"], 2);
        assert_eq!(json["bills_written"], 1);
        assert_eq!(json["skipped_bills"], 1);
    }

    #[test]
    fn test_generate_summary_text() {
        let summary = RunSummary::new(InputCounts::default(), &create_test_output(), 0.25);
        let config = OutputConfig::default();

        let text = generate_summary_text(&summary, &config);

        assert!(text.contains("Processed 2 legislators"));
        assert!(text.contains("Processed 1 bills"));
        assert!(text.contains("Skipped 0 vote results and 1 bills"));
        assert!(text.contains("legislators-support-oppose-count.csv"));
        assert!(!text.contains("Summary:"));
    }
}
