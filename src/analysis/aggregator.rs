//! Vote aggregation engine.
//!
//! Joins votes, vote results, bills and legislators by their foreign keys
//! and accumulates support/oppose counters for both reports. All indices
//! live inside a [`TallyEngine`] that is created and consumed by a single
//! call to [`run`], so nothing carries over between runs.

use crate::models::{
    Bill, BillSupport, Legislator, LegislatorSupport, TallyOutput, Vote, VoteResult, VoteType,
    UNKNOWN_SPONSOR,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Per-vote aggregate, enriched with bill details as the stages run.
#[derive(Debug, Clone)]
struct VoteTally {
    bill_id: String,
    supporter_count: u64,
    opposer_count: u64,
    title: Option<String>,
    sponsor_id: Option<String>,
    sponsor_name: String,
}

impl VoteTally {
    fn new(bill_id: &str) -> Self {
        Self {
            bill_id: bill_id.to_string(),
            supporter_count: 0,
            opposer_count: 0,
            title: None,
            sponsor_id: None,
            sponsor_name: UNKNOWN_SPONSOR.to_string(),
        }
    }

    fn record(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Support => self.supporter_count += 1,
            VoteType::Oppose => self.opposer_count += 1,
        }
    }

    fn to_bill_support(&self) -> BillSupport {
        BillSupport {
            id: self.bill_id.clone(),
            title: self.title.clone().unwrap_or_default(),
            supporter_count: self.supporter_count,
            opposer_count: self.opposer_count,
            primary_sponsor: self.sponsor_name.clone(),
        }
    }
}

/// Support/oppose counters for one legislator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LegislatorCounts {
    supported: u64,
    opposed: u64,
}

impl LegislatorCounts {
    fn record(&mut self, vote_type: VoteType) {
        match vote_type {
            VoteType::Support => self.supported += 1,
            VoteType::Oppose => self.opposed += 1,
        }
    }
}

/// Working state for one aggregation run.
///
/// Vote aggregates are stored in an arena in input order; the maps hold
/// arena slots. Stages must be called in order: [`initialize_votes`],
/// [`fold_vote_results`], [`attach_bill_details`],
/// [`resolve_legislators_and_sponsors`], then [`finish`].
///
/// [`initialize_votes`]: TallyEngine::initialize_votes
/// [`fold_vote_results`]: TallyEngine::fold_vote_results
/// [`attach_bill_details`]: TallyEngine::attach_bill_details
/// [`resolve_legislators_and_sponsors`]: TallyEngine::resolve_legislators_and_sponsors
/// [`finish`]: TallyEngine::finish
#[derive(Debug, Default)]
pub struct TallyEngine {
    votes: Vec<VoteTally>,
    vote_index: HashMap<String, usize>,
    bill_to_vote: HashMap<String, usize>,
    sponsor_to_votes: HashMap<String, Vec<usize>>,
    legislator_counts: HashMap<String, LegislatorCounts>,
    skipped_results: usize,
    skipped_bills: usize,
}

impl TallyEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index votes by id and by bill id, with zeroed counters.
    ///
    /// A repeated vote id replaces the earlier aggregate in place.
    pub fn initialize_votes(&mut self, votes: &[Vote]) {
        debug!("Initializing votes data");

        for vote in votes {
            let tally = VoteTally::new(&vote.bill_id);
            let slot = match self.vote_index.get(&vote.id) {
                Some(&slot) => {
                    self.votes[slot] = tally;
                    slot
                }
                None => {
                    self.votes.push(tally);
                    let slot = self.votes.len() - 1;
                    self.vote_index.insert(vote.id.clone(), slot);
                    slot
                }
            };
            self.bill_to_vote.insert(vote.bill_id.clone(), slot);
        }

        debug!("Initialized {} votes", self.votes.len());
    }

    /// Add every result to its vote's counters and to the legislator's counters.
    ///
    /// Results whose vote id is unknown are skipped and counted.
    pub fn fold_vote_results(&mut self, results: &[VoteResult]) {
        debug!("Processing vote results");

        for result in results {
            let Some(&slot) = self.vote_index.get(&result.vote_id) else {
                warn!(
                    result_id = %result.id,
                    vote_id = %result.vote_id,
                    "Vote not found for result"
                );
                self.skipped_results += 1;
                continue;
            };

            self.votes[slot].record(result.vote_type);
            self.legislator_counts
                .entry(result.legislator_id.clone())
                .or_default()
                .record(result.vote_type);
        }

        debug!(
            "Processed {} vote results ({} skipped)",
            results.len(),
            self.skipped_results
        );
    }

    /// Attach title and sponsor id to the vote of each bill.
    ///
    /// Bills with no matching vote are skipped and counted. If two bills
    /// target the same vote the later one wins.
    pub fn attach_bill_details(&mut self, bills: &[Bill]) {
        debug!("Attaching bill details");

        let mut attached = 0usize;
        for bill in bills {
            let Some(&slot) = self.bill_to_vote.get(&bill.id) else {
                warn!(bill_id = %bill.id, "Vote not found for bill");
                self.skipped_bills += 1;
                continue;
            };

            let tally = &mut self.votes[slot];
            if let Some(previous) = tally.sponsor_id.replace(bill.sponsor_id.clone()) {
                if let Some(slots) = self.sponsor_to_votes.get_mut(&previous) {
                    slots.retain(|&s| s != slot);
                }
            }
            tally.title = Some(bill.title.clone());

            let slots = self
                .sponsor_to_votes
                .entry(bill.sponsor_id.clone())
                .or_default();
            if !slots.contains(&slot) {
                slots.push(slot);
            }
            attached += 1;
        }

        debug!(
            "Attached details for {} bills ({} skipped)",
            attached,
            bills.len() - attached
        );
    }

    /// Build the legislators report and resolve sponsor names.
    ///
    /// The legislators input drives the output: one row per input
    /// legislator in input order, zero counts when they never voted.
    /// Legislators that only appear in vote results are left out.
    pub fn resolve_legislators_and_sponsors(
        &mut self,
        legislators: &[Legislator],
    ) -> Vec<LegislatorSupport> {
        debug!("Compiling legislator support data");

        let mut rows = Vec::with_capacity(legislators.len());

        for legislator in legislators {
            let counts = self
                .legislator_counts
                .get(&legislator.id)
                .copied()
                .unwrap_or_default();

            if let Some(slots) = self.sponsor_to_votes.get(&legislator.id) {
                for &slot in slots {
                    self.votes[slot].sponsor_name = legislator.name.clone();
                }
            }

            rows.push(LegislatorSupport {
                id: legislator.id.clone(),
                name: legislator.name.clone(),
                num_supported_bills: counts.supported,
                num_opposed_bills: counts.opposed,
            });
        }

        debug!("Compiled support data for {} legislators", rows.len());
        rows
    }

    /// One bills report row per vote, in input vote order.
    pub fn emit_bill_records(&self) -> Vec<BillSupport> {
        self.votes.iter().map(VoteTally::to_bill_support).collect()
    }

    /// Consume the engine, pairing the legislators report with the bills report.
    pub fn finish(self, legislators: Vec<LegislatorSupport>) -> TallyOutput {
        let bills = self.emit_bill_records();
        debug!("Compiled support data for {} bills", bills.len());

        TallyOutput {
            legislators,
            bills,
            skipped_results: self.skipped_results,
            skipped_bills: self.skipped_bills,
        }
    }
}

/// Run the full aggregation over fully loaded inputs.
///
/// Every call starts from a fresh [`TallyEngine`], so identical inputs always
/// give identical outputs.
pub fn run(
    votes: &[Vote],
    vote_results: &[VoteResult],
    bills: &[Bill],
    legislators: &[Legislator],
) -> TallyOutput {
    info!(
        votes = votes.len(),
        vote_results = vote_results.len(),
        bills = bills.len(),
        legislators = legislators.len(),
        "Starting vote processing"
    );

    let mut engine = TallyEngine::new();
    engine.initialize_votes(votes);
    engine.fold_vote_results(vote_results);
    engine.attach_bill_details(bills);
    let legislator_rows = engine.resolve_legislators_and_sponsors(legislators);
    let output = engine.finish(legislator_rows);

    info!(
        legislators = output.legislators.len(),
        bills = output.bills.len(),
        "Vote processing completed"
    );

    output
}
