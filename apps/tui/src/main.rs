mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use rag_query_tui::config::{get_log_file, init_app_config};
use rag_query_tui::logging::init_logging;
use rag_query_tui::service::HttpAnswerService;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config(args.endpoint.as_deref())?;

    if let Err(e) = init_logging(&get_log_file(), args.debug) {
        eprintln!("Error initializing logging: {e}");
        eprintln!("Will continue without diagnostics");
    }
    let service = HttpAnswerService::new(&config);
    info!(endpoint = service.endpoint(), "starting rag-query-tui");

    let endpoint = service.endpoint().to_string();
    let mut app = App::new(service, endpoint);

    if let Some(query) = args.query.as_deref() {
        return event::run_headless(&mut app, query, args.json).await;
    }

    // Check if we're running in a terminal
    if !is_terminal() {
        return Err(eyre!(
            "stdout is not a terminal; pass --query to ask a single question"
        ));
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
