//! Filter/join stage: turns raw title and rating rows into the working set.
//!
//! Rows that fail a sentinel check or a numeric coercion are dropped silently;
//! only per-step survivor counts are kept (see [`CleaningStats`]).

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::model::{EnrichedRecord, MOVIE_TYPE, RatingRecord, SENTINEL, TitleRecord};
use crate::stats::CleaningStats;

/// The cleaned, joined movie set every analysis reads from.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    pub records: Vec<EnrichedRecord>,
    pub stats: CleaningStats,
}

impl WorkingSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, or fewer when the set is smaller.
    pub fn sample(&self, n: usize) -> &[EnrichedRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Builds the working set.
///
/// Steps run in a fixed order: keep movies, inner-join ratings on `tconst`,
/// drop sentinel years/genres, parse the year, derive the primary genre,
/// parse votes and rating, keep rows above `config.min_votes`.
/// Title order is preserved; a repeated rating id yields one row per match.
pub fn build_working_set(
    titles: &[TitleRecord],
    ratings: &[RatingRecord],
    config: &AnalysisConfig,
) -> WorkingSet {
    let mut stats = CleaningStats {
        titles_loaded: titles.len(),
        ratings_loaded: ratings.len(),
        ..Default::default()
    };

    let movies: Vec<&TitleRecord> = titles
        .iter()
        .filter(|t| t.title_type == MOVIE_TYPE)
        .collect();
    stats.movies = movies.len();

    let mut ratings_by_id: HashMap<&str, Vec<&RatingRecord>> = HashMap::new();
    for rating in ratings {
        ratings_by_id
            .entry(rating.tconst.as_str())
            .or_default()
            .push(rating);
    }

    let index = &ratings_by_id;
    let joined: Vec<(&TitleRecord, &RatingRecord)> = movies
        .iter()
        .flat_map(move |&title| {
            index
                .get(title.tconst.as_str())
                .into_iter()
                .flatten()
                .map(move |&rating| (title, rating))
        })
        .collect();
    stats.joined = joined.len();

    let non_sentinel: Vec<_> = joined
        .into_iter()
        .filter(|(t, _)| t.start_year != SENTINEL && t.genres != SENTINEL)
        .collect();
    stats.non_sentinel = non_sentinel.len();

    let with_year: Vec<_> = non_sentinel
        .into_iter()
        .filter_map(|(t, r)| parse_year(&t.start_year).map(|year| (t, r, year)))
        .collect();
    stats.year_parsed = with_year.len();

    let with_genre: Vec<_> = with_year
        .into_iter()
        .filter_map(|(t, r, year)| {
            let genre = primary_genre(&t.genres);
            (!genre.is_empty()).then_some((t, r, year, genre))
        })
        .collect();
    stats.genre_present = with_genre.len();

    let numeric: Vec<EnrichedRecord> = with_genre
        .into_iter()
        .filter_map(|(t, r, year, genre)| {
            let num_votes = parse_votes(&r.num_votes)?;
            let average_rating = parse_number(&r.average_rating)?;
            Some(EnrichedRecord {
                tconst: t.tconst.clone(),
                primary_title: t.primary_title.clone(),
                original_title: t.original_title.clone(),
                is_adult: t.is_adult.clone(),
                start_year: year,
                end_year: t.end_year.clone(),
                runtime_minutes: t.runtime_minutes.clone(),
                genres: t.genres.clone(),
                primary_genre: genre.to_string(),
                average_rating,
                num_votes,
            })
        })
        .collect();
    stats.numeric = numeric.len();

    let records: Vec<EnrichedRecord> = numeric
        .into_iter()
        .filter(|e| e.num_votes > config.min_votes)
        .collect();
    stats.working_set = records.len();

    debug!(?stats, "Cleaning steps");
    info!(
        rows = stats.working_set,
        joined = stats.joined,
        dropped = stats.dropped_after_join(),
        retained_pct = stats.retained_pct(),
        "Working set built"
    );

    WorkingSet { records, stats }
}

/// First entry of a comma-separated genre list.
pub fn primary_genre(genres: &str) -> &str {
    genres.split_once(',').map_or(genres, |(head, _)| head)
}

/// Parses a finite decimal number. Surrounding whitespace is ignored.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a year. Decimal forms such as `"2010.0"` are truncated toward zero.
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    parse_number(raw)
        .filter(|v| *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v.trunc() as i32)
}

/// Parses a vote count: non-negative and integral.
///
/// Fractional counts such as `"1500.5"` are rejected on purpose, unlike a
/// lenient numeric cast that would keep them.
pub fn parse_votes(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(votes) = raw.parse::<u64>() {
        return Some(votes);
    }
    parse_number(raw)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64)
}
