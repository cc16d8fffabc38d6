//! Command implementations for the CLI interface.
//!
//! Every command talks to the remote task service through the gateway; the
//! CLI surface blocks on its single request and reports the outcome, unlike
//! the TUI which dispatches and moves on.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::{Local, NaiveDate};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::dates::{format_start, parse_start_input};
use crate::dto::AddTaskCommentForm;
use crate::draft::{Recurrence, TaskDraft};
use crate::fields::{Frequency, Weekday};
use crate::gateway::{Destination, TaskGateway};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive task board.
    Ui {
        /// Group to open. Defaults to the configured group.
        #[arg(long)]
        group: Option<String>,
        /// Task list to open. Defaults to the configured list.
        #[arg(long)]
        list: Option<u64>,
    },

    /// Create a task in a task list.
    Add {
        /// Task title.
        title: String,
        /// Task memo / description.
        #[arg(long)]
        desc: String,
        /// Start: "now", "today 14:00", "tomorrow", "next monday",
        /// "in 3d", or YYYY-MM-DD [HH:MM]. Defaults to now.
        #[arg(long)]
        start: Option<String>,
        /// How often the task repeats: none | daily | weekly | monthly.
        #[arg(long, value_enum)]
        frequency: Frequency,
        /// Weekday for weekly tasks. May be repeated.
        #[arg(long = "on", value_enum)]
        week_days: Vec<Weekday>,
        /// Day of month (1-31) for monthly tasks. Defaults to the start
        /// date's day.
        #[arg(long)]
        month_day: Option<u32>,
        /// Group to create in. Defaults to the configured group.
        #[arg(long)]
        group: Option<String>,
        /// Task list to create in. Defaults to the configured list.
        #[arg(long)]
        list: Option<u64>,
    },

    /// List a task list's tasks for one date.
    Tasks {
        /// Date to show: "today", "tomorrow", or YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        list: Option<u64>,
    },

    /// List the group's task lists.
    Lists {
        #[arg(long)]
        group: Option<String>,
    },

    /// Add a comment to a task.
    Comment {
        /// Task ID to comment on.
        task_id: u64,
        /// Comment text.
        content: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Resolve the target group + task list from flags and config.
pub fn resolve_destination(
    config: &Config,
    group: Option<String>,
    list: Option<u64>,
) -> Destination {
    let group_id = match group.or_else(|| config.group_id.clone()) {
        Some(g) => g,
        None => {
            eprintln!("No group configured. Pass --group or set group_id in the config file.");
            std::process::exit(1);
        }
    };
    let task_list_id = match list.or(config.task_list_id) {
        Some(l) => l,
        None => {
            eprintln!("No task list configured. Pass --list or set task_list_id in the config file.");
            std::process::exit(1);
        }
    };
    Destination { group_id, task_list_id }
}

/// Launch the terminal user interface.
pub fn cmd_ui(runtime: &Runtime, config: &Config, group: Option<String>, list: Option<u64>) {
    let destination = resolve_destination(config, group, list);
    if let Err(e) = run_tui(runtime.handle().clone(), config, destination) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Create a task and wait for the service's answer.
pub fn cmd_add(
    runtime: &Runtime,
    config: &Config,
    title: String,
    desc: String,
    start: Option<String>,
    frequency: Frequency,
    week_days: Vec<Weekday>,
    month_day: Option<u32>,
    group: Option<String>,
    list: Option<u64>,
) {
    let destination = resolve_destination(config, group, list);

    let start = match start.as_deref() {
        None => chrono::Utc::now(),
        Some(s) => match parse_start_input(s) {
            Some(dt) => dt,
            None => {
                eprintln!("Could not understand start date: {s}");
                std::process::exit(1);
            }
        },
    };

    let mut draft = TaskDraft {
        title,
        description: desc,
        start,
        recurrence: None,
    };
    draft.set_frequency(frequency);
    // Fill the fresh payload slot from the CLI flags.
    match &mut draft.recurrence {
        Some(Recurrence::Weekly(days)) => days.extend(week_days),
        Some(Recurrence::Monthly(day)) => {
            if let Some(picked) = month_day {
                *day = picked;
            }
        }
        _ => {}
    }

    let form = match draft.assemble() {
        Ok(form) => form,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let gateway = TaskGateway::new(&config.api_url, config.token.clone());
    match runtime.block_on(gateway.create_task(&destination, &form)) {
        Ok(task) => println!(
            "Created task {} \"{}\" ({})",
            task.id,
            task.name,
            task.frequency.label()
        ),
        Err(e) => {
            eprintln!("Failed to create task: {e}");
            std::process::exit(1);
        }
    }
}

/// Print one date's tasks as a table.
pub fn cmd_tasks(
    runtime: &Runtime,
    config: &Config,
    date: Option<String>,
    group: Option<String>,
    list: Option<u64>,
) {
    let destination = resolve_destination(config, group, list);
    let date = resolve_date_arg(date.as_deref());

    let gateway = TaskGateway::new(&config.api_url, config.token.clone());
    let tasks = match runtime.block_on(gateway.list_tasks(&destination, date)) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Failed to fetch tasks: {e}");
            std::process::exit(1);
        }
    };

    if tasks.is_empty() {
        println!("No tasks on {date}.");
        return;
    }

    println!("{:<6} {:<3} {:<9} {:<5} {}", "ID", "", "Repeat", "Cmts", "Name");
    for t in &tasks {
        let check = if t.checked { "[x]" } else { "[ ]" };
        println!(
            "{:<6} {:<3} {:<9} {:<5} {}",
            t.id,
            check,
            t.frequency.label(),
            t.comment_count,
            t.name
        );
    }
}

/// Print the group's task lists.
pub fn cmd_lists(runtime: &Runtime, config: &Config, group: Option<String>) {
    let group_id = match group.or_else(|| config.group_id.clone()) {
        Some(g) => g,
        None => {
            eprintln!("No group configured. Pass --group or set group_id in the config file.");
            std::process::exit(1);
        }
    };

    let gateway = TaskGateway::new(&config.api_url, config.token.clone());
    let response = match runtime.block_on(gateway.list_task_lists(&group_id)) {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("Failed to fetch task lists: {e}");
            std::process::exit(1);
        }
    };

    println!("{:<6} {:<24} {}", "ID", "Name", "Updated");
    let mut lists = response.task_lists;
    lists.sort_by_key(|l| l.display_index);
    for list in &lists {
        println!(
            "{:<6} {:<24} {}",
            list.id,
            list.name,
            format_start(list.updated_at)
        );
    }
}

/// Post a comment and print the server's record of it.
pub fn cmd_comment(runtime: &Runtime, config: &Config, task_id: u64, content: String) {
    if content.trim().is_empty() {
        eprintln!("Comment content must not be empty.");
        std::process::exit(1);
    }

    let gateway = TaskGateway::new(&config.api_url, config.token.clone());
    let form = AddTaskCommentForm { content };
    match runtime.block_on(gateway.add_comment(task_id, &form)) {
        Ok(comment) => println!(
            "Comment {} by {} added to task {}",
            comment.id, comment.user.nickname, comment.task_id
        ),
        Err(e) => {
            eprintln!("Failed to add comment: {e}");
            std::process::exit(1);
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Parse a --date argument, defaulting to today.
fn resolve_date_arg(date: Option<&str>) -> NaiveDate {
    match date {
        None => Local::now().date_naive(),
        Some(s) => match parse_start_input(s) {
            Some(dt) => dt.with_timezone(&Local).date_naive(),
            None => {
                eprintln!("Could not understand date: {s}");
                std::process::exit(1);
            }
        },
    }
}
