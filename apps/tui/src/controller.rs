use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::domain::{Completion, RequestState};
use crate::service::AnswerService;

/// Owns the question being edited, the request lifecycle and the last answer.
///
/// Requests run on spawned tasks and report back through a channel; results are
/// only applied when the owner hands them to [`QueryController::apply_completion`],
/// so all state changes happen on the task driving the UI. Each submission gets a
/// sequence number and a response older than one already resolved is dropped.
#[derive(Debug)]
pub struct QueryController<S> {
    query: String,
    state: RequestState,
    answer: Option<String>,
    answered_at: Option<DateTime<Local>>,
    latest_seq: u64,
    highest_resolved: u64,
    in_flight: usize,
    service: Arc<S>,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl<S: AnswerService> QueryController<S> {
    pub fn new(service: S) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            query: String::new(),
            state: RequestState::Idle,
            answer: None,
            answered_at: None,
            latest_seq: 0,
            highest_resolved: 0,
            in_flight: 0,
            service: Arc::new(service),
            completions_tx,
            completions_rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub const fn answered_at(&self) -> Option<DateTime<Local>> {
        self.answered_at
    }

    pub const fn is_busy(&self) -> bool {
        self.state.is_pending()
    }

    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.query);
        text.push(c);
        self.update_query(text);
    }

    pub fn pop_char(&mut self) {
        let mut text = std::mem::take(&mut self.query);
        text.pop();
        self.update_query(text);
    }

    /// Sends the current query as-is and returns the sequence number it was tagged with.
    /// Must be called from within a tokio runtime.
    pub fn submit_query(&mut self) -> u64 {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.state = RequestState::Pending;
        self.in_flight += 1;

        info!(seq, query = %self.query, "submitting query");

        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        let query = self.query.clone();
        tokio::spawn(async move {
            let outcome = service.ask(query).await;
            if tx.send(Completion { seq, outcome }).is_err() {
                debug!(seq, "controller dropped before the response arrived");
            }
        });

        seq
    }

    /// Applies a finished request. Returns false when the response was stale and dropped.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        let Completion { seq, outcome } = completion;
        self.in_flight = self.in_flight.saturating_sub(1);

        if seq <= self.highest_resolved {
            debug!(
                seq,
                highest_resolved = self.highest_resolved,
                "discarding stale response"
            );
            return false;
        }
        self.highest_resolved = seq;
        let is_latest = seq == self.latest_seq;

        match outcome {
            Ok(answer) => {
                info!(seq, answer = %answer.answer, "received answer");
                self.answer = Some(answer.answer);
                self.answered_at = Some(Local::now());
                if is_latest {
                    self.state = RequestState::Idle;
                }
            }
            Err(e) => {
                warn!(seq, error = %e, "query failed");
                if is_latest {
                    self.state = RequestState::Failed(e.to_string());
                }
            }
        }

        true
    }

    /// Applies every completion that has already arrived without waiting
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
            applied += 1;
        }
        applied
    }

    /// Waits for the next request to finish and applies it.
    /// Returns `None` straight away when nothing is in flight.
    pub async fn wait_for_completion(&mut self) -> Option<u64> {
        if self.in_flight == 0 {
            return None;
        }

        let completion = self.completions_rx.recv().await?;
        let seq = completion.seq;
        self.apply_completion(completion);
        Some(seq)
    }
}
