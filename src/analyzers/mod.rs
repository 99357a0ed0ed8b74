//! The five read-only analyses over the working set.
//!
//! Each analysis borrows the same `&[EnrichedRecord]` and returns a
//! fully sorted/filtered table; [`analyzer::run_all`] bundles them into an
//! [`types::AnalysisReport`].

pub mod analyzer;
pub mod genre_rating;
pub mod runtime;
pub mod top_rated;
pub mod top_voted;
pub mod types;
pub mod utility;
pub mod votes;

use clap::ValueEnum;

/// Selects one analysis table, e.g. for `--only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Analysis {
    GenreRating,
    TopRated,
    Runtime,
    TopVoted,
    Votes,
}

impl Analysis {
    pub const ALL: [Analysis; 5] = [
        Analysis::GenreRating,
        Analysis::TopRated,
        Analysis::Runtime,
        Analysis::TopVoted,
        Analysis::Votes,
    ];

    /// File name of the table handed to the renderer.
    pub fn file_name(self) -> &'static str {
        match self {
            Analysis::GenreRating => "genre_rating.csv",
            Analysis::TopRated => "top_rated_since.csv",
            Analysis::Runtime => "runtime_vs_rating.csv",
            Analysis::TopVoted => "top_voted_by_genre.csv",
            Analysis::Votes => "votes_vs_rating.csv",
        }
    }
}
