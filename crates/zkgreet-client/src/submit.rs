//! # Submission Client
//!
//! The single network call that carries a proof to the backend. One
//! attempt per invocation: no retry, no timeout beyond the transport's,
//! no idempotency key. A server error status (500) is a rejection whose
//! body is surfaced verbatim; any other status is a success.

use url::Url;

use zkgreet_core::GreetSubmission;

use crate::ClientError;

/// Path of the greeting endpoint, relative to the API base.
const GREET_PATH: &str = "api/greet";

/// The fixed narration shown when the backend accepts a submission.
pub const SUCCESS_MESSAGE: &str = "Your anonymous greeting is onchain :)";

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend accepted the proof.
    Accepted,
    /// The backend rejected it; the message is the response body.
    Rejected(String),
}

/// Client for the `/api/greet` endpoint.
#[derive(Debug, Clone)]
pub struct GreetingApi {
    http: reqwest::Client,
    base_url: Url,
}

impl GreetingApi {
    /// Create a submission client against an API base URL.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Submit a greeting proof. At most one attempt.
    pub async fn submit(&self, body: &GreetSubmission) -> Result<SubmissionOutcome, ClientError> {
        if let Ok(raw) = serde_json::to_string(body) {
            tracing::debug!(payload = %raw, "submitting greeting");
        }

        let url = self.base_url.join(GREET_PATH)?;
        let response = self.http.post(url).json(body).send().await?;

        if response.status().as_u16() == 500 {
            let message = response.text().await.unwrap_or_default();
            return Ok(SubmissionOutcome::Rejected(message));
        }
        Ok(SubmissionOutcome::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body() -> GreetSubmission {
        GreetSubmission {
            greeting: "Hello world".to_string(),
            nullifier_hash: "42".to_string(),
            solidity_proof: "0xabcd".to_string(),
        }
    }

    async fn api_against(server: &MockServer) -> GreetingApi {
        GreetingApi::new(reqwest::Client::new(), Url::parse(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn status_200_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/greet"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = api_against(&server).await.submit(&body()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Accepted);
    }

    #[tokio::test]
    async fn status_500_surfaces_the_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/greet"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let outcome = api_against(&server).await.submit(&body()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Rejected("boom".to_string()));
    }

    #[tokio::test]
    async fn other_error_statuses_count_as_success() {
        // The contract treats only 500 as failure.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/greet"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = api_against(&server).await.submit(&body()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Accepted);
    }

    #[tokio::test]
    async fn wire_body_matches_the_contract() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/greet"))
            .and(body_json_string(
                r#"{"greeting":"Hello world","nullifierHash":"42","solidityProof":"0xabcd"}"#,
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = api_against(&server).await.submit(&body()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Accepted);
    }
}
