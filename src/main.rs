//! CLI entry point for the feedback rater.
//!
//! Provides subcommands for viewing the public leaderboard, a teacher's
//! own dashboard, listing the roster, submitting feedback, exporting
//! snapshots to CSV, and polling for recomputation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use feedback_rater::analyzers::aggregate::aggregate_teachers;
use feedback_rater::analyzers::dashboard::dashboard_for;
use feedback_rater::analyzers::leaderboard::{
    Leaderboard, PUBLIC_TOP_N, RATING_THRESHOLD, rank_teachers,
};
use feedback_rater::output::{export_leaderboard, print_json};
use feedback_rater::records::{FeedbackRecord, NewFeedback, Teacher};
use feedback_rater::store::{FeedbackStore, StoreConfig, SupabaseStore};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "feedback_rater")]
#[command(about = "A tool to aggregate and rank teacher feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the public top-10 leaderboard
    Leaderboard {
        /// Emit the leaderboard as JSON instead of log lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show a teacher's own dashboard
    Dashboard {
        /// The teacher's contact email
        #[arg(short, long)]
        email: String,

        /// Emit the dashboard as JSON instead of log lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List all teachers with their current stats
    ListTeachers,
    /// Validate and insert a feedback submission from a JSON file
    Submit {
        /// Path to a JSON file holding the submission
        #[arg(value_name = "FILE")]
        file: String,
    },
    /// Append the current full ranking to a CSV file
    Export {
        /// CSV file to append snapshot rows to
        #[arg(short, long, default_value = "leaderboard.csv")]
        output: String,
    },
    /// Recompute the leaderboard on an interval
    Watch {
        /// Seconds between recomputations
        #[arg(short, long, default_value_t = 60)]
        interval: u64,

        /// Number of rounds (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 0)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/feedback_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("feedback_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let store = SupabaseStore::new(StoreConfig::from_env()?);

    match cli.command {
        Commands::Leaderboard { json } => {
            let (teachers, feedback) = load_tables(&store).await?;
            let board = rank_teachers(aggregate_teachers(&teachers, &feedback));

            if json {
                print_json(&board.top(PUBLIC_TOP_N))?;
            } else {
                show_leaderboard(&board);
            }
        }
        Commands::Dashboard { email, json } => {
            show_dashboard(&store, &email, json).await?;
        }
        Commands::ListTeachers => {
            list_teachers(&store).await?;
        }
        Commands::Submit { file } => {
            submit(&store, &file).await?;
        }
        Commands::Export { output } => {
            let (teachers, feedback) = load_tables(&store).await?;
            let board = rank_teachers(aggregate_teachers(&teachers, &feedback));

            export_leaderboard(&output, &board)?;
            info!(path = %output, rows = board.len(), "Leaderboard snapshot exported");
        }
        Commands::Watch { interval, count } => {
            watch(&store, interval, count).await?;
        }
    }

    Ok(())
}

/// Reads both tables in full. Every view recomputes from a fresh pair of
/// reads; there is no cache, so new submissions show up on the next call.
#[tracing::instrument(skip(store))]
async fn load_tables(
    store: &impl FeedbackStore,
) -> Result<(Vec<Teacher>, Vec<FeedbackRecord>)> {
    let teachers = store.list_teachers().await?;
    let feedback = store.list_feedback().await?;

    info!(
        teachers = teachers.len(),
        feedback = feedback.len(),
        "Tables loaded"
    );

    Ok((teachers, feedback))
}

fn show_leaderboard(board: &Leaderboard) {
    if board.is_empty() {
        info!(threshold = RATING_THRESHOLD, "No teachers above threshold yet");
        return;
    }

    for (i, entry) in board.top(PUBLIC_TOP_N).iter().enumerate() {
        info!(
            rank = i + 1,
            name = %entry.teacher.name,
            subject = %entry.teacher.subject,
            average = %format!("{:.2}", entry.average_rating),
            reviews = entry.feedback_count,
            "Leaderboard entry"
        );
    }

    info!(
        eligible = board.len(),
        shown = board.top(PUBLIC_TOP_N).len(),
        "Leaderboard computed"
    );
}

async fn show_dashboard(store: &impl FeedbackStore, email: &str, json: bool) -> Result<()> {
    let Some(teacher) = store.find_teacher_by_email(email).await? else {
        warn!(%email, "No teacher is registered under this email");
        return Ok(());
    };

    let (teachers, feedback) = load_tables(store).await?;
    let stats = dashboard_for(&teacher.id, &teachers, &feedback);

    if json {
        return print_json(&stats);
    }

    info!(name = %teacher.name, subject = %teacher.subject, "Dashboard");

    if stats.total_feedback == 0 {
        info!("No feedback submitted yet");
        return Ok(());
    }

    info!(
        total_feedback = stats.total_feedback,
        average = %format!("{:.2}", stats.average_rating),
        performance = performance_label(stats.average_rating),
        "Overall"
    );

    match stats.leaderboard_rank {
        Some(rank) => info!(rank, of = stats.total_ranked, "Leaderboard position"),
        None => info!("Not ranked yet"),
    }

    for param in stats.strengths(5) {
        info!(
            label = param.label,
            average = %format!("{:.2}", param.average),
            "Strength"
        );
    }

    for param in stats.growth_areas(5) {
        info!(
            label = param.label,
            average = %format!("{:.2}", param.average),
            "Growth area"
        );
    }

    for comment in &stats.recent_comments {
        info!(
            date = %comment.created_at.format("%b %-d, %Y"),
            from = %comment.student_email,
            "{}",
            comment.comment
        );
    }

    Ok(())
}

/// Coarse performance label shown next to the dashboard average.
fn performance_label(average: f64) -> &'static str {
    if average >= 4.5 {
        "Excellent"
    } else if average >= 4.0 {
        "Great"
    } else {
        "Good"
    }
}

async fn list_teachers(store: &impl FeedbackStore) -> Result<()> {
    let (teachers, feedback) = load_tables(store).await?;
    let stats = aggregate_teachers(&teachers, &feedback);

    for entry in &stats {
        info!(
            teacher_id = %entry.teacher.id,
            name = %entry.teacher.name,
            subject = %entry.teacher.subject,
            average = %format!("{:.2}", entry.average_rating),
            reviews = entry.feedback_count,
            "Teacher"
        );
    }

    let rated = stats.iter().filter(|s| s.feedback_count > 0).count();
    let eligible = stats
        .iter()
        .filter(|s| s.average_rating >= RATING_THRESHOLD)
        .count();

    info!(
        total = stats.len(),
        rated,
        unrated = stats.len() - rated,
        eligible,
        "Roster summary"
    );

    Ok(())
}

async fn submit(store: &impl FeedbackStore, file: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let mut submission: NewFeedback = serde_json::from_str(&content)?;

    submission.validate()?;

    let teachers = store.list_teachers().await?;
    let Some(teacher) = teachers.iter().find(|t| t.id == submission.teacher_id) else {
        anyhow::bail!("no teacher with id '{}'", submission.teacher_id);
    };

    // The form copies the teacher's subject into the row; do the same when
    // the file leaves it blank.
    if submission.subject.is_empty() {
        submission.subject = teacher.subject.clone();
    }

    store.insert_feedback(&submission).await?;
    info!(teacher = %teacher.name, "Feedback submitted");

    Ok(())
}

/// Recomputes the leaderboard from fresh table reads on a fixed interval.
#[tracing::instrument(skip(store))]
async fn watch(store: &impl FeedbackStore, interval: u64, count: usize) -> Result<()> {
    if count == 0 {
        info!(interval, "Watching indefinitely. Press Ctrl+C to stop.");
    } else {
        info!(interval, count, "Starting watch rounds");
    }

    let mut round = 0;

    loop {
        if count > 0 && round >= count {
            break;
        }
        round += 1;

        info!(
            round,
            total = if count == 0 { None } else { Some(count) },
            "Recomputing leaderboard"
        );

        match load_tables(store).await {
            Ok((teachers, feedback)) => {
                let board = rank_teachers(aggregate_teachers(&teachers, &feedback));
                show_leaderboard(&board);
            }
            Err(e) => {
                // A failed fetch never reaches the aggregation; report it
                // and try again next round.
                tracing::error!(error = %e, "Table load failed");
            }
        }

        if count == 0 || round < count {
            info!(interval, "Waiting before next round");
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
        }
    }

    Ok(())
}
