//! A teacher's own dashboard.
//!
//! The dashboard average is a two-stage mean: each parameter is averaged
//! over the submissions that carry it, then the overall figure is the
//! unweighted mean of those per-parameter averages. With unequal
//! per-parameter coverage this differs from the leaderboard's flat mean,
//! and the portal has always shown both numbers as-is, so the two
//! computations stay separate.

use crate::analyzers::leaderboard::rank_teachers;
use crate::analyzers::types::{DashboardStats, ParameterAverage, RecentComment, TeacherStats};
use crate::analyzers::utility::mean;
use crate::catalog::PARAMETERS;
use crate::records::{FeedbackRecord, Teacher};

/// How many recent comments the dashboard surfaces.
pub const RECENT_COMMENT_LIMIT: usize = 10;

/// Builds the full dashboard for one teacher from the complete table reads.
///
/// The rank is computed against *two-stage* averages for every teacher,
/// filtered and ordered the same way as the leaderboard. `total_ranked` is
/// the size of that filtered field, except when this teacher has no
/// feedback at all, where it reports the full roster size instead.
pub fn dashboard_for(
    teacher_id: &str,
    teachers: &[Teacher],
    feedback: &[FeedbackRecord],
) -> DashboardStats {
    let own: Vec<&FeedbackRecord> = feedback
        .iter()
        .filter(|f| f.teacher_id == teacher_id)
        .collect();

    if own.is_empty() {
        return DashboardStats {
            total_feedback: 0,
            average_rating: 0.0,
            parameter_averages: Vec::new(),
            recent_comments: Vec::new(),
            leaderboard_rank: None,
            total_ranked: teachers.len(),
        };
    }

    let parameter_averages = parameter_averages(&own);
    let average_rating = mean(
        &parameter_averages
            .iter()
            .map(|pa| pa.average)
            .collect::<Vec<_>>(),
    );

    let rankings: Vec<TeacherStats> = teachers
        .iter()
        .map(|teacher| {
            let records: Vec<&FeedbackRecord> = feedback
                .iter()
                .filter(|f| f.teacher_id == teacher.id)
                .collect();

            TeacherStats {
                teacher: teacher.clone(),
                average_rating: two_stage_average(&records),
                feedback_count: records.len(),
            }
        })
        .collect();

    let board = rank_teachers(rankings);

    DashboardStats {
        total_feedback: own.len(),
        average_rating,
        recent_comments: recent_comments(&own, RECENT_COMMENT_LIMIT),
        leaderboard_rank: board.rank_of(teacher_id),
        total_ranked: board.len(),
        parameter_averages,
    }
}

/// Per-parameter averages over the given rows, in catalog order.
///
/// Unlike the flat mean, only null fields are skipped here; parameters
/// with no present value at all are left out of the result.
pub fn parameter_averages(records: &[&FeedbackRecord]) -> Vec<ParameterAverage> {
    PARAMETERS
        .iter()
        .filter_map(|param| {
            let values: Vec<f64> = records
                .iter()
                .filter_map(|r| (param.get)(r))
                .map(|v| v as f64)
                .collect();

            if values.is_empty() {
                return None;
            }

            Some(ParameterAverage {
                key: param.key,
                label: param.label,
                average: mean(&values),
            })
        })
        .collect()
}

/// The two-stage mean: the unweighted mean over whichever per-parameter
/// averages exist. 0.0 when no parameter has a rating.
pub fn two_stage_average(records: &[&FeedbackRecord]) -> f64 {
    let averages: Vec<f64> = parameter_averages(records)
        .iter()
        .map(|pa| pa.average)
        .collect();
    mean(&averages)
}

/// The `n` most recent non-empty comments, newest first.
pub fn recent_comments(records: &[&FeedbackRecord], n: usize) -> Vec<RecentComment> {
    let mut with_comments: Vec<&&FeedbackRecord> = records
        .iter()
        .filter(|r| {
            r.comments
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty())
        })
        .collect();

    with_comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    with_comments
        .into_iter()
        .take(n)
        .map(|r| RecentComment {
            comment: r.comments.clone().unwrap_or_default(),
            student_email: r.student_email.clone(),
            created_at: r.created_at,
        })
        .collect()
}
