//! BePrecise command-line front end.
//!
//! # Responsibility
//! - Parse commands and hand them to the core task/schedule stores.
//! - Render the state the stores return; no business state lives here.

mod render;

use anyhow::Result;
use beprecise_core::config::{ENV_BACKEND, ENV_DATA_DIR, ENV_LOG_LEVEL};
use beprecise_core::db::open_db;
use beprecise_core::model::validation::parse_date;
use beprecise_core::{
    format_iso_date, init_logging, summarize, Cadence, Clock, ConfigError, CoreConfig,
    DocumentRepository, ScheduleStore, SqliteDocumentRepository, StorageBackend, SystemClock,
    TaskStore, ValidationError,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beprecise", version)]
#[command(about = "Budget task time against deadlines and plan your day hour by hour")]
struct Cli {
    /// Directory holding the task and schedule documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage backend (json, sqlite)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage time-budgeted tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Edit the hourly plan of a day
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Show progress grouped by task type
    Summary {
        /// Also list task types without tasks
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task, or replace one with the same title
    Add(TaskAddArgs),

    /// List tasks, optionally filtered by title
    List {
        /// Case-insensitive title filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Log minutes of progress on a task
    Log {
        title: String,
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },

    /// Toggle a task's complete flag
    Done { title: String },

    /// Rename a task
    Rename { old_title: String, new_title: String },

    /// Delete a task
    Delete { title: String },
}

#[derive(Args)]
struct TaskAddArgs {
    /// Task title
    title: String,

    /// Total minutes required
    #[arg(short, long)]
    minutes: i64,

    /// Deadline (YYYY-MM-DD)
    #[arg(short, long)]
    deadline: String,

    /// How the total is spread over the time left
    #[arg(short = 't', long = "type", value_enum, default_value_t = CadenceArg::Daily)]
    cadence: CadenceArg,
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Show the hourly grid with allocated and remaining minutes
    Show {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Fill one hourly slot; an empty task or a duration of 0 clears it
    Set {
        /// Hour of the slot (0-23)
        hour: u32,
        task: String,
        /// Duration in minutes
        #[arg(allow_hyphen_values = true)]
        duration: String,
        #[arg(long)]
        date: Option<String>,
    },

    /// Clear one hourly slot
    Clear {
        hour: u32,
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CadenceArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<CadenceArg> for Cadence {
    fn from(value: CadenceArg) -> Self {
        match value {
            CadenceArg::Daily => Cadence::Daily,
            CadenceArg::Weekly => Cadence::Weekly,
            CadenceArg::Monthly => Cadence::Monthly,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok backend={:?}",
        config.backend
    );

    match config.backend {
        StorageBackend::Json => execute(config.json_repository(), cli.command),
        StorageBackend::Sqlite => {
            let conn = open_db(config.sqlite_file())?;
            execute(SqliteDocumentRepository::new(&conn), cli.command)
        }
    }
}

/// Layers command-line flags over environment variables.
fn resolve_config(cli: &Cli) -> Result<CoreConfig, ConfigError> {
    let flag = |key: &str| -> Option<String> {
        match key {
            ENV_DATA_DIR => cli.data_dir.as_ref().map(|dir| dir.display().to_string()),
            ENV_BACKEND => cli.backend.clone(),
            ENV_LOG_LEVEL => cli.log_level.clone(),
            _ => None,
        }
    };
    CoreConfig::from_lookup(|key| flag(key).or_else(|| std::env::var(key).ok()))
}

fn execute<R: DocumentRepository>(repo: R, command: Commands) -> Result<()> {
    let today = SystemClock.today();
    match command {
        Commands::Task(command) => {
            let mut store = TaskStore::open(repo);
            run_task_command(&mut store, command, today)
        }
        Commands::Plan(command) => {
            let mut store = ScheduleStore::open(repo);
            run_plan_command(&mut store, command, &format_iso_date(today))
        }
        Commands::Summary { all } => {
            let store = TaskStore::open(repo);
            print!("{}", render::summary(&summarize(store.tasks()), all));
            Ok(())
        }
    }
}

fn run_task_command<R: DocumentRepository>(
    store: &mut TaskStore<R>,
    command: TaskCommands,
    today: chrono::NaiveDate,
) -> Result<()> {
    match command {
        TaskCommands::Add(args) => {
            let task = store.add(&args.title, args.minutes, &args.deadline, args.cadence.into())?;
            println!("{}", render::task_line(args.title.trim(), &task, today));
        }
        TaskCommands::List { search } => {
            print!("{}", render::task_list(&store.search(&search), today));
        }
        TaskCommands::Log { title, minutes } => {
            let task = store.log_progress(&title, minutes)?;
            println!("{}", render::task_line(&title, &task, today));
        }
        TaskCommands::Done { title } => {
            let task = store.toggle_complete(&title)?;
            println!("{}", render::task_line(&title, &task, today));
        }
        TaskCommands::Rename {
            old_title,
            new_title,
        } => {
            store.rename(&old_title, &new_title)?;
            println!("Renamed `{old_title}` to `{}`.", new_title.trim());
        }
        TaskCommands::Delete { title } => {
            store.delete(&title)?;
            println!("Deleted `{title}`.");
        }
    }
    Ok(())
}

fn run_plan_command<R: DocumentRepository>(
    store: &mut ScheduleStore<R>,
    command: PlanCommands,
    today: &str,
) -> Result<()> {
    let date = match &command {
        PlanCommands::Show { date }
        | PlanCommands::Set { date, .. }
        | PlanCommands::Clear { date, .. } => plan_date(date.as_deref(), today)?,
    };

    match command {
        PlanCommands::Show { .. } => {}
        PlanCommands::Set {
            hour,
            task,
            duration,
            ..
        } => {
            store.set_slot(&date, hour, &task, &duration)?;
        }
        PlanCommands::Clear { hour, .. } => {
            store.set_slot(&date, hour, "", "0")?;
        }
    }

    print!(
        "{}",
        render::day_plan(&date, &store.get_day(&date), store.allocation(&date))
    );
    Ok(())
}

/// Resolves `--date` to its document key, defaulting to today.
fn plan_date(date: Option<&str>, today: &str) -> Result<String, ValidationError> {
    let date = parse_date(date.unwrap_or(today))?;
    Ok(format_iso_date(date))
}
