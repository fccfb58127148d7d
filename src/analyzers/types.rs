//! Derived statistics types. None of these are persisted; every view
//! recomputes them from a fresh read of the two tables.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::Teacher;

/// A teacher together with their aggregate rating.
///
/// `average_rating` is 0.0 (never NaN) when `feedback_count` is 0.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherStats {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub average_rating: f64,
    pub feedback_count: usize,
}

/// Average rating for a single catalog parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterAverage {
    pub key: &'static str,
    pub label: &'static str,
    pub average: f64,
}

/// One student comment surfaced on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RecentComment {
    pub comment: String,
    pub student_email: String,
    pub created_at: DateTime<Utc>,
}

/// Everything a teacher sees on their own dashboard.
///
/// `average_rating` here is the two-stage mean (mean of per-parameter
/// means), which is intentionally a different number from the flat mean
/// used on the public leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_feedback: usize,
    pub average_rating: f64,
    pub parameter_averages: Vec<ParameterAverage>,
    pub recent_comments: Vec<RecentComment>,
    pub leaderboard_rank: Option<usize>,
    pub total_ranked: usize,
}

impl DashboardStats {
    /// The `n` best-rated parameters, highest first. Parameters with no
    /// ratings count as 0.0, matching how the portal displays them.
    pub fn strengths(&self, n: usize) -> Vec<ParameterAverage> {
        let mut sorted = self.all_parameters();
        sorted.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted.truncate(n);
        sorted
    }

    /// The `n` weakest parameters, lowest first: the tail of the same
    /// descending order the strengths use, reversed. Under tied averages
    /// this picks the later catalog entries, not the earlier ones.
    pub fn growth_areas(&self, n: usize) -> Vec<ParameterAverage> {
        let mut sorted = self.all_parameters();
        sorted.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut tail = sorted.split_off(sorted.len().saturating_sub(n));
        tail.reverse();
        tail
    }

    /// All twenty catalog parameters in catalog order, with unrated ones
    /// filled in at 0.0.
    pub fn all_parameters(&self) -> Vec<ParameterAverage> {
        crate::catalog::PARAMETERS
            .iter()
            .map(|param| ParameterAverage {
                key: param.key,
                label: param.label,
                average: self
                    .parameter_averages
                    .iter()
                    .find(|pa| pa.key == param.key)
                    .map(|pa| pa.average)
                    .unwrap_or(0.0),
            })
            .collect()
    }
}
