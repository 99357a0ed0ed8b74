//! Result tables produced by the analyses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stats::CleaningStats;

/// Mean rating of one primary genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRating {
    pub genre: String,
    pub mean_rating: f64,
    pub movies: usize,
}

/// One row of the top-rated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub votes: u64,
    pub genre: String,
}

/// Runtime (minutes) against rating, one per movie with a usable runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuntimePoint {
    pub runtime_minutes: f64,
    pub rating: f64,
}

/// The most voted movie of one primary genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreTopVoted {
    pub genre: String,
    pub title: String,
    pub votes: u64,
    pub rating: f64,
}

/// Vote count against rating, one per movie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VotePoint {
    pub votes: u64,
    pub rating: f64,
}

/// Summary of a point cloud. `pearson` is `None` when it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationSummary {
    pub points: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub pearson: Option<f64>,
}

/// Everything one run produces, written as `report.json`.
///
/// The point sequences only go to their CSV files.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub cleaning: CleaningStats,
    pub genre_rating: Vec<GenreRating>,
    pub top_rated_since: Vec<TopMovie>,
    pub top_voted_by_genre: Vec<GenreTopVoted>,
    pub runtime_vs_rating: CorrelationSummary,
    /// Computed on log10(votes).
    pub votes_vs_rating: CorrelationSummary,
    #[serde(skip)]
    pub runtime_points: Vec<RuntimePoint>,
    #[serde(skip)]
    pub vote_points: Vec<VotePoint>,
}
