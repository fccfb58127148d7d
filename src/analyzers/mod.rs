//! Feedback aggregation and ranking.
//!
//! This module turns the raw `teachers` and `feedback` tables into derived
//! statistics: a flat-mean average per teacher for the public leaderboard,
//! a two-stage per-parameter breakdown for a teacher's own dashboard, and
//! the threshold-filtered ranking shared by both.

pub mod aggregate;
pub mod dashboard;
pub mod leaderboard;
pub mod types;
pub mod utility;
