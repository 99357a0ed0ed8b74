use serde::Serialize;

/// Rows surviving each step of the cleaning pipeline, in step order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    // inputs
    pub titles_loaded: usize,
    pub ratings_loaded: usize,

    // survivors per step
    pub movies: usize,
    pub joined: usize,
    pub non_sentinel: usize,
    pub year_parsed: usize,
    pub genre_present: usize,
    pub numeric: usize,
    pub working_set: usize,
}

impl CleaningStats {
    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of joined movies that made it into the working set.
    pub fn retained_pct(&self) -> f64 {
        Self::pct(self.working_set, self.joined)
    }

    /// Joined rows dropped by sentinel checks or coercion failures.
    pub fn dropped_after_join(&self) -> usize {
        self.joined - self.working_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(CleaningStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(CleaningStats::pct(50, 100), 50.0);
        assert_eq!(CleaningStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_retained_pct() {
        let stats = CleaningStats {
            joined: 200,
            working_set: 150,
            ..Default::default()
        };

        assert_eq!(stats.retained_pct(), 75.0);
        assert_eq!(stats.dropped_after_join(), 50);
    }
}
