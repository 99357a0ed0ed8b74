//! Row types for the two input datasets and the joined working set.

use serde::Serialize;

/// Token the upstream dumps use for "unknown / not applicable".
pub const SENTINEL: &str = "\\N";

/// Title type kept by the pipeline.
pub const MOVIE_TYPE: &str = "movie";

/// One row of the title basics file, loaded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRecord {
    pub tconst: String,
    pub title_type: String,
    pub primary_title: String,
    pub original_title: String,
    pub is_adult: String,
    pub start_year: String,
    pub end_year: String,
    pub runtime_minutes: String,
    pub genres: String,
}

impl TitleRecord {
    /// Positional column names of the headerless basics file.
    pub const COLUMNS: [&'static str; 9] = [
        "tconst",
        "titleType",
        "primaryTitle",
        "originalTitle",
        "isAdult",
        "startYear",
        "endYear",
        "runtimeMinutes",
        "genres",
    ];

    /// Builds a record from positional fields. Missing trailing fields become empty.
    pub(crate) fn from_fields<'a>(mut fields: impl Iterator<Item = &'a str>) -> Self {
        let mut next = || fields.next().unwrap_or_default().to_string();
        TitleRecord {
            tconst: next(),
            title_type: next(),
            primary_title: next(),
            original_title: next(),
            is_adult: next(),
            start_year: next(),
            end_year: next(),
            runtime_minutes: next(),
            genres: next(),
        }
    }
}

/// One row of the ratings file, loaded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingRecord {
    pub tconst: String,
    pub average_rating: String,
    pub num_votes: String,
}

impl RatingRecord {
    pub const COLUMNS: [&'static str; 3] = ["tconst", "averageRating", "numVotes"];

    pub(crate) fn from_fields<'a>(mut fields: impl Iterator<Item = &'a str>) -> Self {
        let mut next = || fields.next().unwrap_or_default().to_string();
        RatingRecord {
            tconst: next(),
            average_rating: next(),
            num_votes: next(),
        }
    }
}

/// A cleaned movie joined with its rating.
///
/// Every value here has passed coercion: `start_year` is a real year,
/// `primary_genre` is non-empty and `num_votes` is above the configured floor.
/// `runtime_minutes` stays raw; only the runtime analysis parses it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub tconst: String,
    pub primary_title: String,
    pub original_title: String,
    pub is_adult: String,
    pub start_year: i32,
    pub end_year: String,
    pub runtime_minutes: String,
    pub genres: String,
    pub primary_genre: String,
    pub average_rating: f64,
    pub num_votes: u64,
}
