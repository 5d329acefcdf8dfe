use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ClientConfig;
use crate::domain::{Answer, QueryRequest};
use crate::service::{AnswerService, QueryError};

/// Posts questions as JSON to the configured endpoint
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: Client,
    endpoint: Url,
}

impl HttpAnswerService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint_url.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl AnswerService for HttpAnswerService {
    async fn ask(&self, query: String) -> Result<Answer, QueryError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QueryRequest { query: &query })
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        debug!(%status, %body, "raw response from answer service");

        if !status.is_success() {
            return Err(QueryError::Server {
                status: status.as_u16(),
            });
        }

        parse_answer(&body)
    }
}

fn parse_answer(body: &str) -> Result<Answer, QueryError> {
    serde_json::from_str(body).map_err(|e| QueryError::Schema(e.to_string()))
}
