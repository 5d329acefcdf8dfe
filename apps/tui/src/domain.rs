use serde::{Deserialize, Serialize};

use crate::service::QueryError;

/// Lifecycle of the most recently submitted question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

impl RequestState {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Failed(_) => "failed",
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason.as_str()),
            Self::Idle | Self::Pending => None,
        }
    }
}

/// Body posted to the answering service
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Successful response body; fields other than `answer` are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub answer: String,
}

/// Result of one submission, tagged with the sequence number it was issued under
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub outcome: Result<Answer, QueryError>,
}
