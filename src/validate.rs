//! Validation of raw input rows.
//!
//! Each dataset is checked for its required fields before anything is
//! aggregated. The first problem found aborts the run.

use crate::csv_io::Row;
use crate::models::{Bill, Legislator, Vote, VoteResult, VoteType};
use thiserror::Error;
use tracing::{debug, info};

/// Input dataset names, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Votes,
    VoteResults,
    Bills,
    Legislators,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Votes => write!(f, "votes"),
            Dataset::VoteResults => write!(f, "vote results"),
            Dataset::Bills => write!(f, "bills"),
            Dataset::Legislators => write!(f, "legislators"),
        }
    }
}

/// Problems found in input rows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required column is absent or empty.
    #[error("Invalid {dataset} data: missing '{field}' in row {row}")]
    MissingField {
        dataset: Dataset,
        row: usize,
        field: &'static str,
    },

    /// `vote_type` is neither `"1"` nor `"2"`.
    #[error("Invalid vote type '{value}' in row {row}: must be '1' or '2'")]
    InvalidVoteType { row: usize, value: String },
}

/// All four datasets, validated and typed.
#[derive(Debug, Clone, Default)]
pub struct ValidatedInput {
    pub votes: Vec<Vote>,
    pub vote_results: Vec<VoteResult>,
    pub bills: Vec<Bill>,
    pub legislators: Vec<Legislator>,
}

/// Fetch a required field; empty counts as missing. `row` is 1-based.
fn required(
    row: &Row,
    dataset: Dataset,
    index: usize,
    field: &'static str,
) -> Result<String, ValidationError> {
    row.get(field)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingField {
            dataset,
            row: index,
            field,
        })
}

/// Validate vote rows: `id`, `bill_id`.
pub fn validate_votes(rows: &[Row]) -> Result<Vec<Vote>, ValidationError> {
    let votes = rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Vote, ValidationError> {
            Ok(Vote {
                id: required(row, Dataset::Votes, i + 1, "id")?,
                bill_id: required(row, Dataset::Votes, i + 1, "bill_id")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Validated {} votes", votes.len());
    Ok(votes)
}

/// Validate vote result rows: `id`, `legislator_id`, `vote_id`, `vote_type`.
pub fn validate_vote_results(rows: &[Row]) -> Result<Vec<VoteResult>, ValidationError> {
    let results = rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<VoteResult, ValidationError> {
            let line = i + 1;
            let id = required(row, Dataset::VoteResults, line, "id")?;
            let legislator_id = required(row, Dataset::VoteResults, line, "legislator_id")?;
            let vote_id = required(row, Dataset::VoteResults, line, "vote_id")?;
            let code = required(row, Dataset::VoteResults, line, "vote_type")?;
            let vote_type = VoteType::from_code(&code).ok_or_else(|| {
                ValidationError::InvalidVoteType {
                    row: line,
                    value: code.clone(),
                }
            })?;

            Ok(VoteResult {
                id,
                legislator_id,
                vote_id,
                vote_type,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Validated {} vote results", results.len());
    Ok(results)
}

/// Validate bill rows: `id`, `title`, `sponsor_id`.
pub fn validate_bills(rows: &[Row]) -> Result<Vec<Bill>, ValidationError> {
    let bills = rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Bill, ValidationError> {
            Ok(Bill {
                id: required(row, Dataset::Bills, i + 1, "id")?,
                title: required(row, Dataset::Bills, i + 1, "title")?,
                sponsor_id: required(row, Dataset::Bills, i + 1, "sponsor_id")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Validated {} bills", bills.len());
    Ok(bills)
}

/// Validate legislator rows: `id`, `name`.
pub fn validate_legislators(rows: &[Row]) -> Result<Vec<Legislator>, ValidationError> {
    let legislators = rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<Legislator, ValidationError> {
            Ok(Legislator {
                id: required(row, Dataset::Legislators, i + 1, "id")?,
                name: required(row, Dataset::Legislators, i + 1, "name")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Validated {} legislators", legislators.len());
    Ok(legislators)
}

/// Validate all four datasets in order: votes, vote results, bills, legislators.
pub fn validate_all(
    votes: &[Row],
    vote_results: &[Row],
    bills: &[Row],
    legislators: &[Row],
) -> Result<ValidatedInput, ValidationError> {
    let input = ValidatedInput {
        votes: validate_votes(votes)?,
        vote_results: validate_vote_results(vote_results)?,
        bills: validate_bills(bills)?,
        legislators: validate_legislators(legislators)?,
    };

    info!("All input data validated successfully");
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_votes() {
        let votes = validate_votes(&[row(&[("id", "v1"), ("bill_id", "b1")])]).unwrap();
        assert_eq!(
            votes,
            vec![Vote {
                id: "v1".to_string(),
                bill_id: "b1".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_bill_id() {
        let err = validate_votes(&[
            row(&[("id", "v1"), ("bill_id", "b1")]),
            row(&[("id", "v2")]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingField {
                dataset: Dataset::Votes,
                row: 2,
                field: "bill_id"
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid votes data: missing 'bill_id' in row 2"
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = validate_legislators(&[row(&[("id", "l1"), ("name", "  ")])]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingField { field: "name", .. }
        ));
    }

    #[test]
    fn test_vote_type_parsed() {
        let results = validate_vote_results(&[
            row(&[
                ("id", "1"),
                ("legislator_id", "l1"),
                ("vote_id", "v1"),
                ("vote_type", "1"),
            ]),
            row(&[
                ("id", "2"),
                ("legislator_id", "l2"),
                ("vote_id", "v1"),
                ("vote_type", "2"),
            ]),
        ])
        .unwrap();

        assert_eq!(results[0].vote_type, VoteType::Support);
        assert_eq!(results[1].vote_type, VoteType::Oppose);
    }

    #[test]
    fn test_invalid_vote_type() {
        let err = validate_vote_results(&[row(&[
            ("id", "1"),
            ("legislator_id", "l1"),
            ("vote_id", "v1"),
            ("vote_type", "3"),
        ])])
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidVoteType {
                row: 1,
                value: "3".to_string()
            }
        );
    }

    #[test]
    fn test_bill_missing_sponsor() {
        let err = validate_bills(&[row(&[("id", "b1"), ("title", "T")])]).unwrap_err();
        assert!(err.to_string().contains("sponsor_id"));
    }

    #[test]
    fn test_validate_all_stops_at_first_dataset() {
        let bad_votes = vec![row(&[("bill_id", "b1")])];
        let bad_bills = vec![row(&[("id", "b1")])];

        let err = validate_all(&bad_votes, &[], &bad_bills, &[]).unwrap_err();

        assert!(matches!(
            err,
            ValidationError::MissingField {
                dataset: Dataset::Votes,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_all_empty() {
        let input = validate_all(&[], &[], &[], &[]).unwrap();
        assert!(input.votes.is_empty());
        assert!(input.legislators.is_empty());
    }
}
