use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use rag_query_tui::service::AnswerService;
use rag_query_tui::RequestState;
use std::io::Stdout;
use std::time::Duration;
use tracing::debug;

use crate::app::{handle_input, App};
use crate::ui;

/// Ask a single question without the UI and print the outcome
pub async fn run_headless<S: AnswerService>(
    app: &mut App<S>,
    query: &str,
    json: bool,
) -> Result<()> {
    app.controller.update_query(query);
    app.controller.submit_query();
    app.controller.wait_for_completion().await;

    let result = HeadlessResult::from_app(app);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match app.controller.state() {
        RequestState::Failed(reason) => Err(eyre!("Request failed: {reason}")),
        RequestState::Idle | RequestState::Pending => {
            println!("{}", result.answer.unwrap_or_default());
            Ok(())
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct HeadlessResult {
    query: String,
    answer: Option<String>,
    state: &'static str,
    error: Option<String>,
}

impl HeadlessResult {
    fn from_app<S: AnswerService>(app: &App<S>) -> Self {
        let state = app.controller.state();
        Self {
            query: app.controller.query().to_string(),
            answer: app.controller.answer().map(str::to_string),
            state: state.as_str(),
            error: state.failure().map(str::to_string),
        }
    }
}

/// Run the main application event loop
pub async fn run<S: AnswerService>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Apply any responses that arrived since the last frame
        let applied = app.controller.poll_completions();
        if applied > 0 {
            debug!(applied, state = app.controller.state().as_str(), "applied responses");
        }

        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events
                }
            }
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::FixedService;

    #[tokio::test]
    async fn test_headless_json_reports_failure() {
        let mut app = App::new(FixedService(None), String::new());
        app.controller.update_query("q");
        app.controller.submit_query();
        app.controller.wait_for_completion().await;

        let result = HeadlessResult::from_app(&app);
        assert_eq!(result.state, "failed");
        assert_eq!(result.answer, None);
        assert_eq!(
            result.error.as_deref(),
            Some("server returned status 503")
        );
    }

    #[tokio::test]
    async fn test_headless_text_mode_errors_on_failure() {
        let mut app = App::new(FixedService(None), String::new());
        assert!(run_headless(&mut app, "q", false).await.is_err());
    }

    #[tokio::test]
    async fn test_headless_success() -> Result<()> {
        let mut app = App::new(FixedService(Some("answer")), String::new());
        run_headless(&mut app, "", false).await?;
        assert_eq!(app.controller.answer(), Some("answer"));
        Ok(())
    }
}
