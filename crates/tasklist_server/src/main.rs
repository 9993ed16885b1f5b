//! Task list API server.
//!
//! Loads `.env`, reads configuration from the environment, opens the task
//! store and serves the `/tasks` resource until Ctrl-C.

use log::{error, info, warn};
use std::process::ExitCode;
use tasklist_core::db::open_db;
use tasklist_core::{init_logging, SqliteTaskRepository};
use tasklist_server::{build_router, serve, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=server_start module=server status=error error_code=store_open_failed error={err}");
            eprintln!("cannot open task store `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    match SqliteTaskRepository::new(&conn).count_tasks() {
        Ok(count) => info!("event=store_ready module=server status=ok task_count={count}"),
        Err(err) => warn!("event=store_ready module=server status=degraded error={err}"),
    }

    let addr = config.socket_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("event=server_start module=server status=error error_code=bind_failed addr={addr} error={err}");
            eprintln!("cannot listen on {addr}: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("event=server_start module=server status=ok addr={addr}");
    println!("task list API listening on http://{addr}");

    let router = build_router(AppState::new(conn), &config.cors_origin);
    if let Err(err) = serve(listener, router, shutdown_signal()).await {
        error!("event=server_stop module=server status=error error={err}");
        return ExitCode::FAILURE;
    }

    info!("event=server_stop module=server status=ok");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
