//! The managed feedback store.
//!
//! [`FeedbackStore`] is the read/insert surface the aggregation consumes;
//! [`SupabaseStore`] implements it over a Supabase project's PostgREST
//! endpoint. [`StoreConfig`] carries the endpoint and key explicitly, so
//! nothing here reads ambient globals.

mod config;
mod supabase;

pub use config::StoreConfig;
pub use supabase::SupabaseStore;

use anyhow::Result;

use crate::records::{FeedbackRecord, NewFeedback, Teacher};

/// Abstraction over the table store holding teachers and feedback.
///
/// Both list operations return the full table; every view recomputes its
/// aggregates from scratch over these reads.
#[async_trait::async_trait]
pub trait FeedbackStore {
    /// Returns every teacher, ordered by display name.
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// Returns every feedback row.
    async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>>;

    /// Looks a teacher up by their contact email.
    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;

    /// Inserts a validated student submission.
    async fn insert_feedback(&self, submission: &NewFeedback) -> Result<()>;
}
