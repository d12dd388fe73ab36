//! Web application shell.
//!
//! # Architecture Overview
//!
//! ```text
//!   process env ──▶ config (RawEnv → ServerConfig ⊇ ClientConfig) ──┐
//!   settings.toml ─▶ config (AppSettings) ────────────────────────────┤
//!                                                                     ▼
//!                                                        lifecycle::bootstrap
//!                                                                     │
//!                                         ┌───────────────────────────┴───┐
//!                                         ▼                               ▼
//!                                   auth (options,                  http (router,
//!                                   remote provider)                pages, error boundary)
//! ```
//!
//! Startup fails with a non-zero exit and the full list of bad variables
//! if the environment does not validate; nothing is bound in that case.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use app_shell::auth::RemoteAuthProvider;
use app_shell::config::loader::load_optional;
use app_shell::config::{
    resolve_client_config, resolve_server_config, AppSettings, ConfigValidationError, RawEnv,
};
use app_shell::http::HttpServer;
use app_shell::lifecycle::signals::spawn_signal_listener;
use app_shell::lifecycle::startup::bind;
use app_shell::lifecycle::{bootstrap, Shutdown, StartupError};
use app_shell::observability::init_logging;

#[derive(Parser)]
#[command(name = "app-shell")]
#[command(about = "Web application shell with social sign-in", long_about = None)]
struct Cli {
    /// Optional TOML settings file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Validate the environment and exit
    CheckEnv,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_optional(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::CheckEnv => check_env(),
        Commands::Serve => match serve(settings).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Startup failed");
                match &e {
                    StartupError::Environment(issues) => print_issues(issues),
                    other => eprintln!("Error: {}", other),
                }
                ExitCode::FAILURE
            }
        },
    }
}

async fn serve(settings: AppSettings) -> Result<(), StartupError> {
    if let Err(e) = init_logging(&settings.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!("app-shell v{} starting", env!("CARGO_PKG_VERSION"));

    let context = bootstrap(&RawEnv::from_process(), settings)?;
    let auth = RemoteAuthProvider::new(
        &context.auth_options,
        Duration::from_secs(context.settings.timeouts.request_secs),
    )?;

    let listener = bind(&context.settings).await?;

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(&context, Arc::new(auth));
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn check_env() -> ExitCode {
    let env = RawEnv::from_process();
    let resolved = resolve_server_config(&env)
        .and_then(|server| resolve_client_config(&env).map(|client| (server, client)));

    match resolved {
        Ok((server, client)) => {
            println!("environment OK");
            println!("  BETTER_AUTH_URL: {}", server.better_auth_url());
            println!(
                "  DATABASE_URL: {}://{}",
                server.database_scheme(),
                server.database_host().unwrap_or("-")
            );
            println!("  client variables: {:?}", client);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_issues(&e);
            ExitCode::FAILURE
        }
    }
}

fn print_issues(err: &ConfigValidationError) {
    eprintln!("Invalid environment variables:");
    for issue in err.issues() {
        eprintln!("  - {}", issue);
    }
}
