//! Command-line shell for the task desk backend.
//!
//! Usage:
//!
//! ```text
//! taskdesk [--config-dir DIR] [--log-format pretty|json] <command>
//! ```
//!
//! The application is wired once at startup from the configuration directory
//! and each command prints the JSON result of the matching entry point on
//! stdout. Logs go to stderr.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use taskdesk::app::{self, PostgresApp};
use taskdesk::task::domain::{DueFilter, Priority, StatusFilter, TaskSort, TaskView};
use taskdesk::task::services::TaskEdit;
use taskdesk::telemetry::{self, LogFormat};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// Directory holding `config.json` or `config.example.json`.
    #[arg(long, default_value = ".")]
    config_dir: Utf8PathBuf,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create a task")]
    Add {
        /// Task text.
        text: String,
        /// Due date in RFC 3339 format.
        #[arg(long)]
        due: Option<DateTime<Utc>>,
        /// Priority label.
        #[arg(long, default_value = Priority::DEFAULT_LABEL)]
        priority: String,
    },
    #[command(about = "List tasks")]
    List {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        #[arg(long, value_enum, default_value_t = DueArg::All)]
        due: DueArg,
        #[arg(long, value_enum, default_value_t = SortArg::DateDesc)]
        sort: SortArg,
    },
    #[command(about = "Flip the completion flag of a task")]
    Toggle { id: i32 },
    #[command(about = "Change the text, due date, or priority of a task")]
    Edit {
        id: i32,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<DateTime<Utc>>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        priority: Option<String>,
    },
    #[command(about = "Delete a task")]
    Delete { id: i32 },
    #[command(about = "Show or set dark mode")]
    DarkMode { value: Option<Switch> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Active,
    Completed,
}

impl From<StatusArg> for StatusFilter {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DueArg {
    All,
    Today,
    Week,
    Overdue,
}

impl From<DueArg> for DueFilter {
    fn from(value: DueArg) -> Self {
        match value {
            DueArg::All => Self::All,
            DueArg::Today => Self::Today,
            DueArg::Week => Self::Week,
            DueArg::Overdue => Self::Overdue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    DateDesc,
    DateAsc,
    Priority,
}

impl From<SortArg> for TaskSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::DateDesc => Self::CreatedDesc,
            SortArg::DateAsc => Self::CreatedAsc,
            SortArg::Priority => Self::Priority,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn emit(value: &impl Serialize) -> Result<(), BoxError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

async fn run(app: &PostgresApp, command: Commands) -> Result<(), BoxError> {
    match command {
        Commands::Add {
            text,
            due,
            priority,
        } => {
            let label = if priority.trim().is_empty() {
                Priority::DEFAULT_LABEL
            } else {
                priority.as_str()
            };
            emit(&app.add_task(&text, due, label).await)
        }
        Commands::List { status, due, sort } => {
            let view = TaskView::default()
                .with_status(status.into())
                .with_due(due.into())
                .with_sort(sort.into());
            emit(&app.list_tasks_in_view(&view).await)
        }
        Commands::Toggle { id } => emit(&app.toggle_task(id).await),
        Commands::Edit {
            id,
            text,
            due,
            clear_due,
            priority,
        } => {
            let mut edit = TaskEdit::new();
            if let Some(new_text) = text {
                edit = edit.with_text(new_text);
            }
            if clear_due {
                edit = edit.with_due_date(None);
            } else if due.is_some() {
                edit = edit.with_due_date(due);
            }
            if let Some(label) = priority {
                edit = edit.with_priority(label);
            }
            emit(&app.edit_task(id, edit).await)
        }
        Commands::Delete { id } => emit(&app.delete_task(id).await),
        Commands::DarkMode { value: None } => emit(&app.get_dark_mode().await),
        Commands::DarkMode { value: Some(switch) } => {
            emit(&app.set_dark_mode(matches!(switch, Switch::On)).await)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_format)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_dir = %cli.config_dir,
        "taskdesk starting"
    );

    let desk = app::bootstrap_from_dir(&cli.config_dir).await?;
    run(&desk, cli.command).await
}
