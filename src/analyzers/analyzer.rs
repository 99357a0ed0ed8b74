use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::genre_rating::average_rating_by_genre;
use crate::analyzers::top_rated::{TopRatedQuery, top_rated_since};
use crate::analyzers::top_voted::top_voted_by_genre;
use crate::analyzers::types::AnalysisReport;
use crate::analyzers::{runtime, votes};
use crate::config::AnalysisConfig;
use crate::pipeline::WorkingSet;

const SCHEMA_VERSION: u8 = 1;

/// Runs all five analyses over the same working set.
///
/// The analyses are independent and only borrow `working_set`.
pub fn run_all(working_set: &WorkingSet, config: &AnalysisConfig) -> AnalysisReport {
    let records = &working_set.records;

    let genre_rating = average_rating_by_genre(records);
    debug!(genres = genre_rating.len(), "Average rating by genre");

    let top_rated = top_rated_since(records, &TopRatedQuery::from(config));
    debug!(rows = top_rated.len(), "Top rated since");

    let runtime_points = runtime::runtime_vs_rating(records);
    let runtime_summary = runtime::summarize(&runtime_points);
    debug!(
        points = runtime_points.len(),
        skipped = records.len() - runtime_points.len(),
        "Runtime vs rating"
    );

    let top_voted = top_voted_by_genre(records);
    debug!(genres = top_voted.len(), "Top voted by genre");

    let vote_points = votes::votes_vs_rating(records);
    let votes_summary = votes::summarize(&vote_points);

    info!(
        rows = records.len(),
        genres = genre_rating.len(),
        runtime_pearson = ?runtime_summary.pearson,
        votes_pearson = ?votes_summary.pearson,
        "Analyses complete"
    );

    AnalysisReport {
        schema_version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        cleaning: working_set.stats.clone(),
        genre_rating,
        top_rated_since: top_rated,
        top_voted_by_genre: top_voted,
        runtime_vs_rating: runtime_summary,
        votes_vs_rating: votes_summary,
        runtime_points,
        vote_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::movie;
    use crate::stats::CleaningStats;

    #[test]
    fn test_run_all_fills_every_table() {
        let records = vec![
            movie("t1", "Drama", 2010, 8.5, 50_000),
            movie("t2", "Comedy", 1995, 6.5, 300),
            movie("t3", "Drama", 2012, 7.0, 12_000),
        ];
        let working_set = WorkingSet {
            stats: CleaningStats {
                working_set: records.len(),
                ..Default::default()
            },
            records,
        };

        let report = run_all(&working_set, &AnalysisConfig::default());

        assert_eq!(report.schema_version, 1);
        assert_eq!(report.cleaning.working_set, 3);
        assert_eq!(report.genre_rating.len(), 2);
        assert_eq!(report.top_rated_since.len(), 2);
        assert_eq!(report.top_rated_since[0].title, "Movie t1");
        assert_eq!(report.top_voted_by_genre.len(), 2);
        assert_eq!(report.runtime_points.len(), 3);
        assert_eq!(report.vote_points.len(), 3);
        assert_eq!(report.runtime_vs_rating.pearson, None);
    }

    #[test]
    fn test_run_all_on_empty_set() {
        let working_set = WorkingSet {
            records: Vec::new(),
            stats: CleaningStats::default(),
        };

        let report = run_all(&working_set, &AnalysisConfig::default());

        assert!(report.genre_rating.is_empty());
        assert!(report.top_rated_since.is_empty());
        assert!(report.top_voted_by_genre.is_empty());
        assert!(report.runtime_points.is_empty());
        assert!(report.vote_points.is_empty());
    }
}
