use std::error::Error;

use chrono::{Datelike, Local, Utc};
use clap::{Parser, Subcommand};
use url::Url;

use taskdeck::calendar::YearMonth;
use taskdeck::client::Client;
use taskdeck::config::DEFAULT_API_URL;
use taskdeck::dashboard::Dashboard;
use taskdeck::{NewQuickTask, QuickTaskKind, Session, Store, TaskId, TaskStatus};
use taskdeck::utils::{print_board, print_dashboard, print_month_grid, print_quick_task, print_stats, print_task};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Browse and update your tasks from a terminal")]
struct Cli {
    /// Root of the REST API
    #[arg(long, env = "TASKDECK_URL", default_value = DEFAULT_API_URL)]
    url: Url,

    /// API token of the logged-in user
    #[arg(long, env = "TASKDECK_TOKEN", hide_env_values = true)]
    token: String,

    /// ID of the logged-in user, recorded as the creator of new quick tasks
    #[arg(long, env = "TASKDECK_USER_ID")]
    user_id: Option<String>,

    /// Name used in the greeting
    #[arg(long, env = "TASKDECK_USERNAME")]
    username: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a month, with the tasks due on each day
    Calendar {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// 1 to 12. Defaults to the current month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// List the tasks, grouped by status
    Board,

    /// Show the task statistics
    Stats,

    /// Show every widget of the dashboard
    Dashboard,

    /// Change the status of a task
    SetStatus {
        id: String,

        /// TODO, DOING, DONE or PAUSED
        status: String,
    },

    /// List the goals of the month
    Goals,

    /// Add a goal for this month
    AddGoal {
        title: String,
    },

    /// Delete quick tasks (goals or daily tasks)
    DeleteQuickTasks {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(cli.url, cli.token);
    if let Some(user_id) = cli.user_id {
        session = session.with_user_id(user_id);
    }
    if let Some(username) = cli.username {
        session = session.with_username(username);
    }
    log::debug!("Using {:?}", session);

    let store = Store::new(Client::new(session)?);
    store.refresh().await?;
    let snapshot = store.snapshot().await;

    match cli.command {
        Command::Calendar { year, month } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month0 = month.map(|m| m - 1).unwrap_or_else(|| today.month0());
            print_month_grid(&snapshot.month_grid(YearMonth::new(year, month0)), today);
        },

        Command::Board => print_board(&snapshot.board()),

        Command::Stats => print_stats(&snapshot.stats_at(Utc::now())),

        Command::Dashboard => {
            let dashboard = Dashboard::build(&snapshot, store.source().session(), Utc::now());
            print_dashboard(&dashboard);
        },

        Command::SetStatus { id, status } => {
            let status: TaskStatus = status.parse()?;
            let id: TaskId = id.parse()?;
            let updated = store.set_task_status(&id, status).await?;
            print_task(&updated);
        },

        Command::Goals => {
            snapshot.quick_tasks_of(QuickTaskKind::Month).for_each(print_quick_task);
        },

        Command::AddGoal { title } => {
            let created = store.create_quick_task(&NewQuickTask::goal(title)).await?;
            print_quick_task(&created);
        },

        Command::DeleteQuickTasks { ids } => {
            let deleted = store.delete_quick_tasks(&ids).await?;
            println!("Deleted {} quick tasks", deleted);
        },
    }

    Ok(())
}
