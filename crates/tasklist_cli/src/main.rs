//! Terminal front-end for the task list API.
//!
//! # Responsibility
//! - Load the list once, then turn stdin lines into controller actions.
//! - Re-render the whole view after every action.
//! - Report failures as one-line notices; the view is left as it was.

mod command;

use clap::Parser;
use command::{parse_command, Command, HELP};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_client::{render, HttpTaskApi, Key, TaskApi, TaskListController};
use tasklist_core::{default_log_level, init_logging, TaskId};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Terminal client for the task list API")]
struct Args {
    /// Base URL of the task list API.
    #[arg(long, env = "TASKLIST_API_URL", default_value = "http://localhost:5000")]
    api_url: String,
    #[arg(long, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = args
        .log_dir
        .unwrap_or_else(|| std::env::temp_dir().join("tasklist"));
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        // Logs are optional for the front-end; keep going without them.
        eprintln!("logging disabled: {err}");
    }

    let mut controller = TaskListController::new(HttpTaskApi::new(args.api_url));
    info!(
        "event=cli_start module=cli status=ok api_url={}",
        controller.api().base_url()
    );
    if let Err(err) = controller.load().await {
        notice(&format!("could not load tasks: {err}"));
    }
    println!("{}", render(&controller.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!("event=stdin_read module=cli status=error error={err}");
                eprintln!("cannot read input: {err}");
                return ExitCode::FAILURE;
            }
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                notice(&err.to_string());
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            command => {
                if let Err(message) = run(&mut controller, command).await {
                    notice(&message);
                }
            }
        }
        println!("{}", render(&controller.view()));
    }

    info!("event=cli_stop module=cli status=ok");
    ExitCode::SUCCESS
}

async fn run<A: TaskApi>(
    controller: &mut TaskListController<A>,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::Type(text) => {
            let editing = controller.state().editing.is_some();
            if !text.is_empty() {
                if editing {
                    controller.set_edit_text(text).map_err(|err| err.to_string())?;
                } else {
                    controller.set_input(text);
                }
            }
            controller
                .handle_key(Key::Enter)
                .await
                .map_err(|err| err.to_string())
        }
        Command::Toggle(row) => {
            let id = row_id(controller, row)?;
            controller.toggle(id).await.map_err(|err| err.to_string())
        }
        Command::Delete(row) => {
            let id = row_id(controller, row)?;
            controller.delete(id).await.map_err(|err| err.to_string())
        }
        Command::Edit(row) => {
            let id = row_id(controller, row)?;
            controller.begin_edit(id).map_err(|err| err.to_string())
        }
        Command::Cancel => {
            controller.cancel_edit();
            Ok(())
        }
        Command::Help | Command::Quit => Ok(()),
    }
}

fn row_id<A: TaskApi>(controller: &TaskListController<A>, row: usize) -> Result<TaskId, String> {
    controller
        .state()
        .tasks
        .get_row(row)
        .map(|task| task.id)
        .ok_or_else(|| format!("no task at row {row}"))
}

fn notice(message: &str) {
    warn!("event=cli_notice module=cli status=error message={message:?}");
    println!("! {message}");
}
