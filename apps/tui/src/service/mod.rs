// Service module for rag-query-tui
// The remote answering service and the errors it can produce

mod error;
mod http;

pub use error::QueryError;
pub use http::HttpAnswerService;

use crate::domain::Answer;
use std::future::Future;

/// Turns a question into an answer. Implementations must be cheap to share
/// across spawned request tasks.
pub trait AnswerService: Send + Sync + 'static {
    fn ask(&self, query: String) -> impl Future<Output = Result<Answer, QueryError>> + Send;
}
