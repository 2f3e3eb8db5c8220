mod app_state;
mod cli;
mod simulate;

use std::process::ExitCode;

use pagesync_config::toml_loader::{create_default_config, default_config_path};
use pagesync_config::{config_to_json, load_config, load_config_from, PageSyncConfig};
use pagesync_common::{ConfigError, PageSyncError};
use pagesync_core::SyncSettings;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use cli::{Args, Command};

const DEFAULT_LOG_DIRECTIVE: &str = "pagesync=info";

fn init_logging(directive: &str) {
    let filter: Directive = directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid log directive {directive:?}, using {DEFAULT_LOG_DIRECTIVE}");
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &Args) -> Result<PageSyncConfig, ConfigError> {
    match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

fn main() -> ExitCode {
    let args = cli::parse();
    let command = args.command();

    // `config --init` must work even when the existing file is broken.
    if let Command::Config { init: true } = command {
        init_logging(args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE));
        return report(write_default_config(&args));
    }

    let config = load(&args);
    let directive = match (&args.log_level, &config) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => DEFAULT_LOG_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("cannot start: {e}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Run { url } => run_window(config, url),
        Command::Simulate { scenario, json } => {
            let settings = SyncSettings::from_config(&config);
            report(simulate::run(&scenario, &settings, json).map(|out| print!("{out}")))
        }
        Command::Config { .. } => {
            println!("{}", config_to_json(&config));
            ExitCode::SUCCESS
        }
    }
}

fn run_window(mut config: PageSyncConfig, url: Option<String>) -> ExitCode {
    tracing::info!("pagesync v{} starting...", env!("CARGO_PKG_VERSION"));
    if url.is_some() {
        config.window.url = url;
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = app_state::PageSyncApp::new(config);

    tracing::info!("Entering event loop");
    let result = event_loop.run_app(&mut app);
    tracing::info!("Shutdown complete");
    match result {
        Ok(()) if app.failed() => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Event loop error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn write_default_config(args: &Args) -> Result<(), PageSyncError> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    if path.exists() {
        return Err(PageSyncError::Other(format!(
            "{} already exists, not overwriting",
            path.display()
        )));
    }
    create_default_config(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn report(result: Result<(), PageSyncError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
