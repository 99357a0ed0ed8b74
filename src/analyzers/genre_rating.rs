use std::collections::BTreeMap;

use crate::analyzers::types::GenreRating;
use crate::analyzers::utility::mean;
use crate::model::EnrichedRecord;

/// Mean rating per primary genre, highest mean first.
///
/// Groups are built in genre-name order and then stably sorted, so genres
/// with equal means stay alphabetical.
pub fn average_rating_by_genre(records: &[EnrichedRecord]) -> Vec<GenreRating> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.primary_genre.as_str())
            .or_default()
            .push(record.average_rating);
    }

    let mut table: Vec<GenreRating> = groups
        .into_iter()
        .map(|(genre, ratings)| GenreRating {
            genre: genre.to_string(),
            mean_rating: mean(&ratings),
            movies: ratings.len(),
        })
        .collect();

    table.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
    table
}
