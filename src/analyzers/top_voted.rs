use std::collections::HashSet;

use crate::analyzers::types::GenreTopVoted;
use crate::model::EnrichedRecord;

/// The most voted movie of each primary genre, most votes first.
///
/// Equal vote counts within a genre go to the movie that comes first in the
/// working set.
pub fn top_voted_by_genre(records: &[EnrichedRecord]) -> Vec<GenreTopVoted> {
    let mut by_votes: Vec<&EnrichedRecord> = records.iter().collect();
    by_votes.sort_by(|a, b| b.num_votes.cmp(&a.num_votes));

    let mut seen: HashSet<&str> = HashSet::new();
    by_votes
        .into_iter()
        .filter(|r| seen.insert(r.primary_genre.as_str()))
        .map(|r| GenreTopVoted {
            genre: r.primary_genre.clone(),
            title: r.primary_title.clone(),
            votes: r.num_votes,
            rating: r.average_rating,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::movie;

    #[test]
    fn test_one_winner_per_genre() {
        let records = vec![
            movie("d1", "Drama", 2000, 8.0, 1_000),
            movie("c1", "Comedy", 2000, 6.0, 7_000),
            movie("d2", "Drama", 2000, 7.0, 50_000),
            movie("c2", "Comedy", 2000, 5.0, 300),
            movie("h1", "Horror", 2000, 4.0, 2_000),
        ];

        let table = top_voted_by_genre(&records);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].genre, "Drama");
        assert_eq!(table[0].title, "Movie d2");
        assert_eq!(table[0].votes, 50_000);
        assert_eq!(table[0].rating, 7.0);
        assert_eq!(table[1].title, "Movie c1");
        assert_eq!(table[2].title, "Movie h1");

        for winner in &table {
            assert!(
                records
                    .iter()
                    .filter(|r| r.primary_genre == winner.genre)
                    .all(|r| r.num_votes <= winner.votes)
            );
        }
    }

    #[test]
    fn test_tie_goes_to_first_in_input() {
        let records = vec![
            movie("first", "Drama", 2000, 6.0, 900),
            movie("second", "Drama", 2000, 9.0, 900),
        ];

        let table = top_voted_by_genre(&records);

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].title, "Movie first");
    }
}
