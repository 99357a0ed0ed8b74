use crate::analyzers::types::TopMovie;
use crate::config::AnalysisConfig;
use crate::model::EnrichedRecord;

/// Which movies qualify for the top-rated table and how many to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopRatedQuery {
    pub since_year: i32,
    /// Strict lower bound on votes.
    pub min_votes: u64,
    pub limit: usize,
}

impl Default for TopRatedQuery {
    fn default() -> Self {
        TopRatedQuery {
            since_year: 2000,
            min_votes: 10_000,
            limit: 10,
        }
    }
}

impl From<&AnalysisConfig> for TopRatedQuery {
    fn from(config: &AnalysisConfig) -> Self {
        TopRatedQuery {
            since_year: config.recent_since_year,
            min_votes: config.recent_min_votes,
            limit: config.recent_limit,
        }
    }
}

/// Highest rated movies released in or after `since_year`.
///
/// Equal ratings keep working-set order. Fewer qualifying movies than
/// `limit` gives a shorter table.
pub fn top_rated_since(records: &[EnrichedRecord], query: &TopRatedQuery) -> Vec<TopMovie> {
    let mut qualifying: Vec<&EnrichedRecord> = records
        .iter()
        .filter(|r| r.start_year >= query.since_year && r.num_votes > query.min_votes)
        .collect();

    qualifying.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));

    qualifying
        .into_iter()
        .take(query.limit)
        .map(|r| TopMovie {
            title: r.primary_title.clone(),
            year: r.start_year,
            rating: r.average_rating,
            votes: r.num_votes,
            genre: r.primary_genre.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::fixtures::movie;

    #[test]
    fn test_filters_and_orders() {
        let records = vec![
            movie("old", "Drama", 1999, 9.9, 90_000),
            movie("few", "Drama", 2015, 9.8, 10_000),
            movie("a", "Drama", 2000, 7.1, 10_001),
            movie("b", "Action", 2010, 8.5, 50_000),
            movie("c", "Comedy", 2020, 8.9, 20_000),
        ];

        let top = top_rated_since(&records, &TopRatedQuery::default());

        let titles: Vec<_> = top.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Movie c", "Movie b", "Movie a"]);
        assert_eq!(top[1].genre, "Action");
        assert_eq!(top[1].year, 2010);
        assert_eq!(top[1].votes, 50_000);
    }

    #[test]
    fn test_truncates_to_limit() {
        let records: Vec<_> = (0..25)
            .map(|i| movie(&format!("t{i}"), "Drama", 2005, i as f64 / 3.0, 20_000))
            .collect();

        let top = top_rated_since(&records, &TopRatedQuery::default());

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(top.iter().all(|m| m.year >= 2000 && m.votes > 10_000));
        assert_eq!(top[0].title, "Movie t24");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            movie("first", "Drama", 2005, 8.0, 20_000),
            movie("second", "Drama", 2005, 8.0, 30_000),
        ];

        let top = top_rated_since(&records, &TopRatedQuery::default());

        assert_eq!(top[0].title, "Movie first");
        assert_eq!(top[1].title, "Movie second");
    }

    #[test]
    fn test_query_from_config() {
        let config = AnalysisConfig {
            recent_since_year: 1990,
            recent_min_votes: 5,
            recent_limit: 3,
            ..Default::default()
        };

        let query = TopRatedQuery::from(&config);

        assert_eq!(query.since_year, 1990);
        assert_eq!(query.min_votes, 5);
        assert_eq!(query.limit, 3);
        assert_eq!(
            TopRatedQuery::from(&AnalysisConfig::default()),
            TopRatedQuery::default()
        );
    }
}
