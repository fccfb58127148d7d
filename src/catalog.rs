//! The fixed catalog of rating parameters.
//!
//! One ordered list of twenty `(key, label, accessor)` entries shared by
//! submission validation, leaderboard aggregation, and the dashboard. The
//! key set must stay identical across all three consumers; a mismatch would
//! silently drop a parameter from the averages.

use crate::records::FeedbackRecord;

/// One rating dimension, scored 1–5 per submission.
pub struct Parameter {
    /// Column name in the `feedback` table.
    pub key: &'static str,
    /// Human-readable label shown on forms and dashboards.
    pub label: &'static str,
    /// Reads this parameter's value out of a feedback row.
    pub get: fn(&FeedbackRecord) -> Option<i32>,
}

/// The twenty rating parameters, in display order.
pub static PARAMETERS: [Parameter; 20] = [
    Parameter {
        key: "clarity_explanation",
        label: "Clarity of Explanation",
        get: |r| r.clarity_explanation,
    },
    Parameter {
        key: "simplification",
        label: "Simplification of Complex Topics",
        get: |r| r.simplification,
    },
    Parameter {
        key: "examples_analogies",
        label: "Use of Examples & Analogies",
        get: |r| r.examples_analogies,
    },
    Parameter {
        key: "engagement",
        label: "Engagement & Interaction",
        get: |r| r.engagement,
    },
    Parameter {
        key: "pace_teaching",
        label: "Pace of Teaching",
        get: |r| r.pace_teaching,
    },
    Parameter {
        key: "depth_knowledge",
        label: "Depth of Knowledge",
        get: |r| r.depth_knowledge,
    },
    Parameter {
        key: "accuracy_info",
        label: "Accuracy of Information",
        get: |r| r.accuracy_info,
    },
    Parameter {
        key: "concept_reinforcement",
        label: "Concept Reinforcement",
        get: |r| r.concept_reinforcement,
    },
    Parameter {
        key: "problem_solving",
        label: "Problem-Solving Guidance",
        get: |r| r.problem_solving,
    },
    Parameter {
        key: "clarity_instructions",
        label: "Clarity of Instructions",
        get: |r| r.clarity_instructions,
    },
    Parameter {
        key: "patience_approachability",
        label: "Patience & Approachability",
        get: |r| r.patience_approachability,
    },
    Parameter {
        key: "motivation_encouragement",
        label: "Motivation & Encouragement",
        get: |r| r.motivation_encouragement,
    },
    Parameter {
        key: "adaptability",
        label: "Adaptability",
        get: |r| r.adaptability,
    },
    Parameter {
        key: "visual_aids",
        label: "Visual Aids / Presentation Skills",
        get: |r| r.visual_aids,
    },
    Parameter {
        key: "technology_integration",
        label: "Technology Integration",
        get: |r| r.technology_integration,
    },
    Parameter {
        key: "interactive_methods",
        label: "Interactive Methods",
        get: |r| r.interactive_methods,
    },
    Parameter {
        key: "helping_understand",
        label: "Helping Students Understand",
        get: |r| r.helping_understand,
    },
    Parameter {
        key: "critical_thinking",
        label: "Encouraging Critical Thinking",
        get: |r| r.critical_thinking,
    },
    Parameter {
        key: "homework_support",
        label: "Homework & Assignments Support",
        get: |r| r.homework_support,
    },
    Parameter {
        key: "openness_feedback",
        label: "Openness to Feedback",
        get: |r| r.openness_feedback,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_twenty_unique_keys() {
        let keys: HashSet<_> = PARAMETERS.iter().map(|p| p.key).collect();
        assert_eq!(PARAMETERS.len(), 20);
        assert_eq!(keys.len(), 20);
    }

    #[test]
    fn test_accessors_read_their_own_field() {
        // A uniform record must yield the same value through every accessor,
        // and a blank record none at all.
        let rated = FeedbackRecord::uniform("t-1", 3);
        let blank = FeedbackRecord::default();

        for param in PARAMETERS.iter() {
            assert_eq!((param.get)(&rated), Some(3), "key {}", param.key);
            assert_eq!((param.get)(&blank), None, "key {}", param.key);
        }
    }

    #[test]
    fn test_keys_match_serialized_column_names() {
        // Accessor keys must be actual columns of the feedback row, or the
        // submission payload and the aggregation would disagree.
        let record = FeedbackRecord::uniform("t-1", 2);
        let json = serde_json::to_value(&record).unwrap();

        for param in PARAMETERS.iter() {
            assert_eq!(json[param.key], 2, "key {}", param.key);
        }
    }
}
