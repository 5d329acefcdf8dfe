use clap::Parser;
use rag_query_tui::config::LOG_FILE_ENV_VAR;

#[derive(Debug, Parser)]
#[command(
    name = "rag-query-tui",
    version,
    about = "Ask questions to a RAG answering service"
)]
pub struct CliArgs {
    /// Answering service URL that questions are POSTed to (overrides RAG_QUERY_ENDPOINT)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Ask a single question, print the answer and exit
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Print the headless result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the log file location
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_ENV_VAR, path);
        }
    }
}
