//! Data models for the vote tally.
//!
//! This module contains the typed input records, the aggregated output
//! records and the run summary used throughout the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sponsor name used when a bill's sponsor is not in the legislators input.
pub const UNKNOWN_SPONSOR: &str = "Unknown";

/// How a legislator voted on a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Encoded as `"1"` in the input data.
    Support,
    /// Encoded as `"2"` in the input data.
    Oppose,
}

impl VoteType {
    /// Returns the wire code used in the vote results file.
    #[allow(dead_code)] // Used by tests and by callers building input rows
    pub fn code(&self) -> &'static str {
        match self {
            VoteType::Support => "1",
            VoteType::Oppose => "2",
        }
    }

    /// Parses a wire code, returning `None` for anything but `"1"` or `"2"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(VoteType::Support),
            "2" => Some(VoteType::Oppose),
            _ => None,
        }
    }
}

/// A ballot event tied to a single bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: String,
    pub bill_id: String,
}

/// One legislator's cast ballot on a specific vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteResult {
    pub id: String,
    pub legislator_id: String,
    pub vote_id: String,
    pub vote_type: VoteType,
}

/// A bill with its primary sponsor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: String,
    pub title: String,
    pub sponsor_id: String,
}

/// A legislator and their display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legislator {
    pub id: String,
    pub name: String,
}

/// Output row of the legislators report.
///
/// Field order is the column order of the written CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislatorSupport {
    pub id: String,
    pub name: String,
    pub num_supported_bills: u64,
    pub num_opposed_bills: u64,
}

/// Output row of the bills report.
///
/// Field order is the column order of the written CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSupport {
    /// The bill identifier (not the vote identifier).
    pub id: String,
    pub title: String,
    pub supporter_count: u64,
    pub opposer_count: u64,
    pub primary_sponsor: String,
}

/// Everything one run of the engine produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyOutput {
    pub legislators: Vec<LegislatorSupport>,
    pub bills: Vec<BillSupport>,
    /// Vote results whose vote id matched no vote.
    pub skipped_results: usize,
    /// Bills whose id matched no vote.
    pub skipped_bills: usize,
}

/// Record counts for the four input datasets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCounts {
    pub votes: usize,
    pub vote_results: usize,
    pub bills: usize,
    pub legislators: usize,
}

/// Summary of a completed run, written as JSON on request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the reports were generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records read per input dataset.
    pub inputs: InputCounts,
    /// Number of rows in the legislators report.
    pub legislators_written: usize,
    /// Number of rows in the bills report.
    pub bills_written: usize,
    /// Vote results skipped because their vote was unknown.
    pub skipped_results: usize,
    /// Bills skipped because no vote referenced them.
    pub skipped_bills: usize,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
}

impl RunSummary {
    /// Builds a summary from the inputs and the engine output.
    pub fn new(inputs: InputCounts, output: &TallyOutput, duration_seconds: f64) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs,
            legislators_written: output.legislators.len(),
            bills_written: output.bills.len(),
            skipped_results: output.skipped_results,
            skipped_bills: output.skipped_bills,
            duration_seconds,
        }
    }

    /// Returns true when any input reference was dropped.
    pub fn has_skips(&self) -> bool {
        self.skipped_results > 0 || self.skipped_bills > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_type_codes() {
        assert_eq!(VoteType::from_code("1"), Some(VoteType::Support));
        assert_eq!(VoteType::from_code("2"), Some(VoteType::Oppose));
        assert_eq!(VoteType::from_code("3"), None);
        assert_eq!(VoteType::from_code(""), None);
        assert_eq!(VoteType::Support.code(), "1");
        assert_eq!(VoteType::Oppose.code(), "2");
    }

    #[test]
    fn test_run_summary_from_output() {
        let output = TallyOutput {
            legislators: vec![LegislatorSupport {
                id: "l1".to_string(),
                name: "Alice".to_string(),
                num_supported_bills: 1,
                num_opposed_bills: 0,
            }],
            bills: Vec::new(),
            skipped_results: 2,
            skipped_bills: 0,
        };
        let inputs = InputCounts {
            votes: 0,
            vote_results: 3,
            bills: 0,
            legislators: 1,
        };

        let summary = RunSummary::new(inputs, &output, 0.5);
        assert_eq!(summary.legislators_written, 1);
        assert_eq!(summary.bills_written, 0);
        assert_eq!(summary.skipped_results, 2);
        assert!(summary.has_skips());
    }

    #[test]
    fn test_summary_serializes_counts() {
        let summary = RunSummary::new(InputCounts::default(), &TallyOutput::default(), 0.0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["inputs"]["vote_results"], 0);
        assert_eq!(json["skipped_bills"], 0);
        assert!(json["generated_at"].is_string());
        assert!(!summary.has_skips());
    }
}
