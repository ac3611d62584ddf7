//! # Commitment Registry
//!
//! Fetches the published membership set. The backend serves it as a
//! static resource: an ordered JSON list of identity commitments,
//! encoded as decimal strings (or bare numbers, which some publishers
//! emit for small values).

use url::Url;

use zkgreet_crypto::{CryptoError, MembershipSet};

use crate::ClientError;

/// Path of the static membership-set resource, relative to the API base.
const COMMITMENTS_PATH: &str = "identityCommitments.json";

/// Client for the published membership set.
#[derive(Debug, Clone)]
pub struct CommitmentRegistry {
    http: reqwest::Client,
    base_url: Url,
}

impl CommitmentRegistry {
    /// Create a registry client against an API base URL.
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch and parse the membership set.
    pub async fn fetch(&self) -> Result<MembershipSet, ClientError> {
        let url = self.base_url.join(COMMITMENTS_PATH)?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::BadResponse(format!(
                "commitment set fetch returned {}",
                response.status()
            )));
        }
        let values: Vec<serde_json::Value> = response.json().await?;
        let decimals = values
            .iter()
            .map(value_to_decimal)
            .collect::<Result<Vec<_>, _>>()?;
        MembershipSet::from_dec_strings(&decimals)
            .map_err(|e: CryptoError| ClientError::BadResponse(e.to_string()))
    }
}

fn value_to_decimal(value: &serde_json::Value) -> Result<String, ClientError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(ClientError::BadResponse(format!(
            "commitment entry is neither string nor number: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zkgreet_crypto::Fr;

    async fn registry_against(server: &MockServer) -> CommitmentRegistry {
        CommitmentRegistry::new(
            reqwest::Client::new(),
            Url::parse(&server.uri()).unwrap(),
        )
    }

    #[tokio::test]
    async fn fetches_and_parses_decimal_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identityCommitments.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "1",
                "2",
                "3"
            ])))
            .mount(&server)
            .await;

        let set = registry_against(&server).await.fetch().await.unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.prove_membership(Fr::from(2u64)).is_ok());
    }

    #[tokio::test]
    async fn accepts_bare_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identityCommitments.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .mount(&server)
            .await;

        let set = registry_against(&server).await.fetch().await.unwrap();
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identityCommitments.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = registry_against(&server).await.fetch().await.unwrap_err();
        assert!(matches!(err, ClientError::BadResponse(_)));
    }

    #[tokio::test]
    async fn malformed_entries_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identityCommitments.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"bad": true}])),
            )
            .mount(&server)
            .await;

        let err = registry_against(&server).await.fetch().await.unwrap_err();
        assert!(matches!(err, ClientError::BadResponse(_)));
    }
}
