use rag_query_tui::service::{AnswerService, HttpAnswerService};
use rag_query_tui::QueryController;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

const THROBBER_STEP: Duration = Duration::from_millis(100);

/// Which of the two query bar controls receives Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    SendButton,
}

impl Focus {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Input => Self::SendButton,
            Self::SendButton => Self::Input,
        }
    }
}

/// What the answer panel shows; exactly one at a time
#[derive(Debug, PartialEq, Eq)]
pub enum AnswerView<'a> {
    Busy,
    Answer(&'a str),
    Placeholder,
}

pub const ANSWER_PLACEHOLDER: &str = "Your answer will appear here";

#[derive(Debug)]
pub struct App<S = HttpAnswerService> {
    pub running: bool,
    pub show_help: bool,
    pub focus: Focus,
    pub controller: QueryController<S>,
    pub endpoint: String,
    pub throbber_state: ThrobberState,
    pub last_frame: Instant,
}

impl<S: AnswerService> App<S> {
    pub fn new(service: S, endpoint: String) -> Self {
        Self {
            running: true,
            show_help: false,
            focus: Focus::Input,
            controller: QueryController::new(service),
            endpoint,
            throbber_state: ThrobberState::default(),
            last_frame: Instant::now(),
        }
    }

    /// Advances the busy spinner while a request is outstanding
    pub fn update(&mut self) {
        if !self.controller.is_busy() {
            return;
        }

        let now = Instant::now();
        if now.duration_since(self.last_frame) >= THROBBER_STEP {
            self.throbber_state.calc_next();
            self.last_frame = now;
        }
    }

    pub fn submit(&mut self) {
        self.controller.submit_query();
    }

    pub fn answer_view(&self) -> AnswerView<'_> {
        if self.controller.is_busy() {
            return AnswerView::Busy;
        }

        match self.controller.answer() {
            Some(answer) if !answer.is_empty() => AnswerView::Answer(answer),
            _ => AnswerView::Placeholder,
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(reason) = self.controller.state().failure() {
            return format!("Request failed: {reason}");
        }

        if self.controller.is_busy() {
            return format!("Asking {}...", self.endpoint);
        }

        self.controller.answered_at().map_or_else(
            || format!("Ready. Questions go to {}", self.endpoint),
            |at| format!("Answered at {}", at.format("%H:%M:%S")),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rag_query_tui::domain::Answer;
    use rag_query_tui::service::QueryError;

    /// Answers every question with a fixed reply, or fails when none is set
    #[derive(Debug)]
    pub struct FixedService(pub Option<&'static str>);

    impl AnswerService for FixedService {
        async fn ask(&self, _query: String) -> Result<Answer, QueryError> {
            self.0.map_or_else(
                || Err(QueryError::Server { status: 503 }),
                |answer| {
                    Ok(Answer {
                        answer: answer.to_string(),
                    })
                },
            )
        }
    }

    fn app(reply: Option<&'static str>) -> App<FixedService> {
        App::new(FixedService(reply), "http://localhost:8000/query".to_string())
    }

    #[test]
    fn test_placeholder_before_any_answer() {
        let app = app(None);
        assert_eq!(app.answer_view(), AnswerView::Placeholder);
        assert_eq!(
            app.status_line(),
            "Ready. Questions go to http://localhost:8000/query"
        );
    }

    #[tokio::test]
    async fn test_busy_then_answer() {
        let mut app = app(Some("Active learning picks informative samples."));

        app.submit();
        assert_eq!(app.answer_view(), AnswerView::Busy);

        app.controller.wait_for_completion().await;
        assert_eq!(
            app.answer_view(),
            AnswerView::Answer("Active learning picks informative samples.")
        );
        assert!(app.status_line().starts_with("Answered at "));
    }

    #[tokio::test]
    async fn test_empty_answer_shows_placeholder() {
        let mut app = app(Some(""));

        app.submit();
        app.controller.wait_for_completion().await;

        assert_eq!(app.controller.answer(), Some(""));
        assert_eq!(app.answer_view(), AnswerView::Placeholder);
    }

    #[tokio::test]
    async fn test_failure_is_reported_in_status_line() {
        let mut app = app(None);

        app.submit();
        app.controller.wait_for_completion().await;

        assert_eq!(app.answer_view(), AnswerView::Placeholder);
        assert_eq!(
            app.status_line(),
            "Request failed: server returned status 503"
        );
    }

    #[test]
    fn test_focus_toggles_between_controls() {
        assert_eq!(Focus::Input.toggle(), Focus::SendButton);
        assert_eq!(Focus::SendButton.toggle(), Focus::Input);
    }
}
