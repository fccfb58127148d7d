//! Output formatting and persistence for computed rankings.
//!
//! Supports pretty JSON logging and appending leaderboard snapshots to CSV.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::leaderboard::Leaderboard;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One exported leaderboard row. A snapshot timestamp is attached so
/// repeated exports into the same file stay distinguishable.
#[derive(Debug, Serialize)]
pub struct LeaderboardRow {
    pub recorded_at: DateTime<Utc>,
    pub rank: usize,
    pub teacher_id: String,
    pub name: String,
    pub subject: String,
    pub average_rating: f64,
    pub feedback_count: usize,
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends the full ranked leaderboard to a CSV file, one row per eligible
/// teacher. Creates the file with headers if it does not already exist.
pub fn export_leaderboard(path: &str, board: &Leaderboard) -> Result<()> {
    let recorded_at = Utc::now();

    for (i, entry) in board.entries().iter().enumerate() {
        let row = LeaderboardRow {
            recorded_at,
            rank: i + 1,
            teacher_id: entry.teacher.id.clone(),
            name: entry.teacher.name.clone(),
            subject: entry.teacher.subject.clone(),
            average_rating: entry.average_rating,
            feedback_count: entry.feedback_count,
        };
        append_record(path, &row)?;
    }

    Ok(())
}

/// Appends a [`LeaderboardRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &LeaderboardRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::leaderboard::rank_teachers;
    use crate::analyzers::types::TeacherStats;
    use crate::records::Teacher;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_row() -> LeaderboardRow {
        LeaderboardRow {
            recorded_at: Utc::now(),
            rank: 1,
            teacher_id: "t-1".to_string(),
            name: "Teacher One".to_string(),
            subject: "History".to_string(),
            average_rating: 4.75,
            feedback_count: 8,
        }
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_row()).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("feedback_rater_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_row()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("feedback_rater_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_row()).unwrap();
        append_record(&path, &sample_row()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content
            .lines()
            .filter(|l| l.contains("recorded_at"))
            .count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_writes_one_row_per_eligible_teacher() {
        let path = temp_path("feedback_rater_test_export.csv");
        let _ = fs::remove_file(&path);

        let board = rank_teachers(vec![
            TeacherStats {
                teacher: Teacher {
                    id: "t-1".to_string(),
                    name: "Teacher One".to_string(),
                    ..Default::default()
                },
                average_rating: 4.5,
                feedback_count: 2,
            },
            TeacherStats {
                teacher: Teacher {
                    id: "t-2".to_string(),
                    name: "Teacher Two".to_string(),
                    ..Default::default()
                },
                average_rating: 3.0,
                feedback_count: 1,
            },
        ]);

        export_leaderboard(&path, &board).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 1 data row (the sub-threshold teacher is not exported)
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
