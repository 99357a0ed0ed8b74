use crate::analyzers::types::{CorrelationSummary, VotePoint};
use crate::analyzers::utility::correlation_summary;
use crate::model::EnrichedRecord;

/// Vote count against rating for every movie in the working set.
pub fn votes_vs_rating(records: &[EnrichedRecord]) -> Vec<VotePoint> {
    records
        .iter()
        .map(|r| VotePoint {
            votes: r.num_votes,
            rating: r.average_rating,
        })
        .collect()
}

/// Summary on a log10 vote axis. Working-set votes are always above zero.
pub fn summarize(points: &[VotePoint]) -> CorrelationSummary {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points
        .iter()
        .filter(|p| p.votes > 0)
        .map(|p| ((p.votes as f64).log10(), p.rating))
        .unzip();
    correlation_summary(&xs, &ys)
}
