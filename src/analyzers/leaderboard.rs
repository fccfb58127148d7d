use crate::analyzers::types::TeacherStats;

/// Minimum average rating a teacher needs to appear on the leaderboard at
/// all. Teachers below this are invisible to ranking, not just hidden.
pub const RATING_THRESHOLD: f64 = 4.0;

/// How many entries the public leaderboard shows.
pub const PUBLIC_TOP_N: usize = 10;

/// The threshold-filtered, descending-sorted ranking.
///
/// Holds the full eligible sequence so that rank lookups see past the
/// public top-10 cutoff.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    ranked: Vec<TeacherStats>,
}

/// Filters out teachers below [`RATING_THRESHOLD`] and sorts the rest by
/// `average_rating`, highest first. The sort is stable, so ties keep their
/// input order; there is no secondary tie-break field.
pub fn rank_teachers(mut stats: Vec<TeacherStats>) -> Leaderboard {
    stats.retain(|s| s.average_rating >= RATING_THRESHOLD);
    stats.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Leaderboard { ranked: stats }
}

impl Leaderboard {
    /// The first `n` entries, for public display.
    pub fn top(&self, n: usize) -> &[TeacherStats] {
        &self.ranked[..self.ranked.len().min(n)]
    }

    /// A teacher's 1-based rank, or `None` if they did not make the
    /// threshold (or do not exist).
    pub fn rank_of(&self, teacher_id: &str) -> Option<usize> {
        self.ranked
            .iter()
            .position(|s| s.teacher.id == teacher_id)
            .map(|i| i + 1)
    }

    /// Number of teachers that cleared the threshold.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// The full eligible sequence, best first.
    pub fn entries(&self) -> &[TeacherStats] {
        &self.ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Teacher;

    fn stats(id: &str, average: f64, count: usize) -> TeacherStats {
        TeacherStats {
            teacher: Teacher {
                id: id.to_string(),
                name: format!("Teacher {id}"),
                ..Default::default()
            },
            average_rating: average,
            feedback_count: count,
        }
    }

    #[test]
    fn test_threshold_excludes_low_averages() {
        let board = rank_teachers(vec![
            stats("a", 4.2, 3),
            stats("b", 3.99, 10),
            stats("c", 0.0, 0),
        ]);

        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].teacher.id, "a");
    }

    #[test]
    fn test_exact_threshold_is_included() {
        let board = rank_teachers(vec![stats("a", 4.0, 1)]);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_sorted_descending() {
        let board = rank_teachers(vec![
            stats("a", 4.1, 1),
            stats("b", 4.9, 1),
            stats("c", 4.5, 1),
        ]);

        let ids: Vec<_> = board.entries().iter().map(|s| s.teacher.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let board = rank_teachers(vec![
            stats("first", 4.5, 1),
            stats("second", 4.5, 2),
            stats("third", 4.5, 3),
        ]);

        let ids: Vec<_> = board.entries().iter().map(|s| s.teacher.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn test_top_truncates_to_ten() {
        let input: Vec<_> = (0..15)
            .map(|i| stats(&format!("t-{i}"), 4.0 + (i as f64) / 100.0, 1))
            .collect();
        let board = rank_teachers(input);

        assert_eq!(board.top(PUBLIC_TOP_N).len(), 10);
        assert_eq!(board.len(), 15);
        // Rank lookups still see entries past the public cutoff.
        assert_eq!(board.rank_of("t-0"), Some(15));
    }

    #[test]
    fn test_rank_of_is_one_based() {
        let board = rank_teachers(vec![stats("a", 4.8, 1), stats("b", 4.2, 1)]);
        assert_eq!(board.rank_of("a"), Some(1));
        assert_eq!(board.rank_of("b"), Some(2));
    }

    #[test]
    fn test_rank_of_below_threshold_or_unknown_is_none() {
        let board = rank_teachers(vec![stats("a", 4.8, 1), stats("b", 3.2, 1)]);
        assert_eq!(board.rank_of("b"), None);
        assert_eq!(board.rank_of("nobody"), None);
    }
}
