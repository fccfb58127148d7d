//! Row types for the two store tables and the submission payload.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::PARAMETERS;

/// A row from the `teachers` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `feedback` table.
///
/// Each of the twenty rating fields is optional: older rows or partial
/// submissions may leave a parameter null, and the aggregation treats
/// those as absent rather than as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub teacher_id: String,
    pub student_email: String,
    pub subject: String,

    pub clarity_explanation: Option<i32>,
    pub simplification: Option<i32>,
    pub examples_analogies: Option<i32>,
    pub engagement: Option<i32>,
    pub pace_teaching: Option<i32>,
    pub depth_knowledge: Option<i32>,
    pub accuracy_info: Option<i32>,
    pub concept_reinforcement: Option<i32>,
    pub problem_solving: Option<i32>,
    pub clarity_instructions: Option<i32>,
    pub patience_approachability: Option<i32>,
    pub motivation_encouragement: Option<i32>,
    pub adaptability: Option<i32>,
    pub visual_aids: Option<i32>,
    pub technology_integration: Option<i32>,
    pub interactive_methods: Option<i32>,
    pub helping_understand: Option<i32>,
    pub critical_thinking: Option<i32>,
    pub homework_support: Option<i32>,
    pub openness_feedback: Option<i32>,

    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Builds a record rating every parameter with the same value.
    /// Test scaffolding only.
    #[cfg(test)]
    pub(crate) fn uniform(teacher_id: &str, rating: i32) -> Self {
        let mut record = FeedbackRecord {
            teacher_id: teacher_id.to_string(),
            ..Default::default()
        };
        record.set_all_ratings(Some(rating));
        record
    }

    #[cfg(test)]
    pub(crate) fn set_all_ratings(&mut self, value: Option<i32>) {
        self.clarity_explanation = value;
        self.simplification = value;
        self.examples_analogies = value;
        self.engagement = value;
        self.pace_teaching = value;
        self.depth_knowledge = value;
        self.accuracy_info = value;
        self.concept_reinforcement = value;
        self.problem_solving = value;
        self.clarity_instructions = value;
        self.patience_approachability = value;
        self.motivation_encouragement = value;
        self.adaptability = value;
        self.visual_aids = value;
        self.technology_integration = value;
        self.interactive_methods = value;
        self.helping_understand = value;
        self.critical_thinking = value;
        self.homework_support = value;
        self.openness_feedback = value;
    }
}

/// A new feedback submission, as inserted into the `feedback` table.
///
/// The ratings map is flattened into the row on serialization, so the
/// payload matches the table columns exactly. [`NewFeedback::validate`]
/// checks the map against the parameter catalog before any insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub teacher_id: String,
    pub student_email: String,
    pub subject: String,
    #[serde(flatten)]
    pub ratings: BTreeMap<String, i32>,
    pub comments: String,
}

impl NewFeedback {
    /// Validates the submission against the static parameter catalog:
    /// every catalog key must be rated, every value must be in 1..=5,
    /// and no unknown keys may be present.
    pub fn validate(&self) -> Result<()> {
        for param in PARAMETERS.iter() {
            match self.ratings.get(param.key) {
                None => anyhow::bail!("missing rating for parameter '{}'", param.key),
                Some(v) if !(1..=5).contains(v) => {
                    anyhow::bail!(
                        "rating for parameter '{}' is {}, expected 1..=5",
                        param.key,
                        v
                    );
                }
                Some(_) => {}
            }
        }

        for key in self.ratings.keys() {
            if !PARAMETERS.iter().any(|p| p.key == key.as_str()) {
                anyhow::bail!("unknown rating parameter '{}'", key);
            }
        }

        Ok(())
    }
}
