use crate::analyzers::types::TeacherStats;
use crate::catalog::PARAMETERS;
use crate::records::{FeedbackRecord, Teacher};

/// Aggregates every teacher's feedback into a [`TeacherStats`] using the
/// flat mean: one average over every individual rating value across all
/// twenty parameters and all of that teacher's submissions.
///
/// A rating of 0 counts as absent, same as a null field. Only the 1–5
/// scale values enter the sum, so the filter just guards against rows
/// written before a parameter existed.
pub fn aggregate_teachers(teachers: &[Teacher], feedback: &[FeedbackRecord]) -> Vec<TeacherStats> {
    teachers
        .iter()
        .map(|teacher| {
            let records: Vec<&FeedbackRecord> = feedback
                .iter()
                .filter(|f| f.teacher_id == teacher.id)
                .collect();

            TeacherStats {
                teacher: teacher.clone(),
                average_rating: flat_average(&records),
                feedback_count: records.len(),
            }
        })
        .collect()
}

/// The flat mean over a set of feedback rows: total of all present,
/// non-zero rating values divided by how many there were. 0.0 when there
/// are none.
pub fn flat_average(records: &[&FeedbackRecord]) -> f64 {
    let mut total = 0i64;
    let mut count = 0usize;

    for record in records {
        for param in PARAMETERS.iter() {
            match (param.get)(record) {
                Some(v) if v != 0 => {
                    total += v as i64;
                    count += 1;
                }
                _ => {}
            }
        }
    }

    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}
