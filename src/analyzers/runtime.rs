use crate::analyzers::types::{CorrelationSummary, RuntimePoint};
use crate::analyzers::utility::correlation_summary;
use crate::model::EnrichedRecord;
use crate::pipeline::parse_number;

/// Runtime against rating for movies whose runtime parses as a number.
///
/// Movies without a usable runtime are skipped here only; the working set
/// itself is untouched. Points keep working-set order.
pub fn runtime_vs_rating(records: &[EnrichedRecord]) -> Vec<RuntimePoint> {
    records
        .iter()
        .filter_map(|r| {
            parse_number(&r.runtime_minutes).map(|runtime_minutes| RuntimePoint {
                runtime_minutes,
                rating: r.average_rating,
            })
        })
        .collect()
}

pub fn summarize(points: &[RuntimePoint]) -> CorrelationSummary {
    let (xs, ys): (Vec<f64>, Vec<f64>) = points
        .iter()
        .map(|p| (p.runtime_minutes, p.rating))
        .unzip();
    correlation_summary(&xs, &ys)
}
