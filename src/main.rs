//! Tasker - single-user task tracking
//!
//! Command-line front end over [`tasker::TaskService`].

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use tasker::validation::{
    parse_positive_int, parse_yes_no, validate_description, validate_title, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
use tasker::{FileTaskStore, Task, TaskId, TaskService, TaskUpdate, TaskerConfig, TaskerError};

#[derive(Parser)]
#[command(name = "tasker")]
#[command(version = "0.1.0")]
#[command(about = "Track personal tasks in a plain text file", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base directory for the config file and relative task file paths
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Task file to use (overrides tasker.toml)
    #[arg(short, long, global = true, env = "TASKER_FILE")]
    file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (1-100 characters)
        #[arg(value_parser = parse_title)]
        title: String,

        /// Optional description (up to 500 characters)
        #[arg(short, long, value_parser = parse_description)]
        description: Option<String>,
    },

    /// List tasks, newest first
    List {
        /// Only show tasks that are not completed
        #[arg(long, conflicts_with = "completed")]
        pending: bool,

        /// Only show completed tasks
        #[arg(long)]
        completed: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set whether a task is completed (yes/no, да/нет, y/n, true/false, 1/0)
    Status {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,

        /// Completed?
        #[arg(value_parser = parse_answer, action = clap::ArgAction::Set)]
        completed: bool,
    },

    /// Mark a task completed
    Done {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },

    /// Mark a task not completed
    Undone {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },

    /// Change the title and/or description of a task
    Edit {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,

        /// New title
        #[arg(short, long, value_parser = parse_title)]
        title: Option<String>,

        /// New description (pass "" to clear it)
        #[arg(short, long, value_parser = parse_description)]
        description: Option<String>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        #[arg(value_parser = parse_task_id)]
        id: TaskId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the path of the task file
    Path,
}

fn parse_task_id(s: &str) -> Result<TaskId, String> {
    parse_positive_int(s)
        .and_then(TaskId::new)
        .ok_or_else(|| format!("'{s}' is not a positive numeric ID"))
}

fn parse_answer(s: &str) -> Result<bool, String> {
    parse_yes_no(s).ok_or_else(|| format!("'{s}' is not a yes/no answer"))
}

fn parse_title(s: &str) -> Result<String, String> {
    if validate_title(s) {
        Ok(s.trim().to_string())
    } else {
        Err(format!(
            "title must not be empty and must be at most {MAX_TITLE_LEN} characters"
        ))
    }
}

fn parse_description(s: &str) -> Result<String, String> {
    validate_description(s)
        .ok_or_else(|| format!("description must be at most {MAX_DESCRIPTION_LEN} characters"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> tasker::Result<()> {
    let base_dir = cli.dir.canonicalize().unwrap_or(cli.dir.clone());
    let config = TaskerConfig::load(&base_dir)?;

    // Initialize tracing
    let filter = if cli.verbose || config.verbose {
        "tasker=debug,info"
    } else {
        "tasker=warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let tasks_file = config.resolve_tasks_file(&base_dir, cli.file.as_deref());

    if let Commands::Path = cli.command {
        println!("{}", tasks_file.display());
        return Ok(());
    }

    let store = FileTaskStore::open(&tasks_file).await;
    let mut service = TaskService::new(store);

    match cli.command {
        Commands::Add { title, description } => {
            let id = service.add_task(&title, description.as_deref()).await?;
            println!("{} Task added with ID: {}", "OK".green().bold(), id);
        }

        Commands::List {
            pending,
            completed,
            json,
        } => {
            let tasks: Vec<Task> = service
                .get_all_tasks()
                .await?
                .into_iter()
                .filter(|t| !(pending && t.is_completed) && !(completed && !t.is_completed))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                for task in &tasks {
                    print_task(task);
                }
            }
        }

        Commands::Show { id, json } => {
            let task = service
                .get_task(id)
                .await?
                .ok_or_else(|| TaskerError::not_found(id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                print_task(&task);
            }
        }

        Commands::Status { id, completed } => set_completion(&mut service, id, completed).await?,
        Commands::Done { id } => set_completion(&mut service, id, true).await?,
        Commands::Undone { id } => set_completion(&mut service, id, false).await?,

        Commands::Edit {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                return Err(TaskerError::invalid_argument(
                    "nothing to change: pass --title and/or --description",
                ));
            }
            let mut update = TaskUpdate::new();
            update.title = title;
            update.description = description;

            if service.update_task(id, update).await? {
                println!("{} Task {} updated.", "OK".green().bold(), id);
            } else {
                println!("{} Could not update task {}.", "Warning:".yellow(), id);
            }
        }

        Commands::Delete { id, yes } => {
            let task = service
                .get_task(id)
                .await?
                .ok_or_else(|| TaskerError::not_found(id))?;

            if !yes {
                print_task(&task);
                if !confirm("Are you sure you want to delete this task? (yes/no): ").await? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }

            if service.delete_task(id).await? {
                println!("{} Task {} deleted.", "OK".green().bold(), id);
            } else {
                println!("{} Could not delete task {}.", "Warning:".yellow(), id);
            }
        }

        Commands::Path => {}
    }

    Ok(())
}

async fn set_completion(
    service: &mut TaskService<FileTaskStore>,
    id: TaskId,
    completed: bool,
) -> tasker::Result<()> {
    if service.update_completion(id, completed).await? {
        let state = if completed { "completed" } else { "not completed" };
        println!("{} Task {} marked {}.", "OK".green().bold(), id, state);
    } else {
        println!("{} Could not update task {}.", "Warning:".yellow(), id);
    }
    Ok(())
}

async fn confirm(prompt: &str) -> tasker::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    tokio::io::BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(parse_yes_no(&answer).unwrap_or(false))
}

fn print_task(task: &Task) {
    let marker = if task.is_completed {
        task.status_marker().green().bold()
    } else {
        task.status_marker().normal()
    };
    println!("{} ID: {}", marker, task.id);
    println!("    Title: {}", task.title);
    if !task.description.is_empty() {
        println!("    Description: {}", task.description);
    }
    println!(
        "    Created: {}",
        task.created_at
            .with_timezone(&chrono::Local)
            .format("%d.%m.%Y %H:%M")
    );
    println!();
}
