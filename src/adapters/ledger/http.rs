//! REST ledger gateway client
//!
//! The gateway exposes one resource per contract address and trial id:
//!
//! - `PUT {base_url}/contracts/{address}/hashes/{trial_id}` with body
//!   `{"hash": "..."}` publishes a hash
//! - `GET` on the same path returns `{"hash": "..."}`
//!
//! A 404, or a 200 carrying an empty hash, means nothing was published.

use super::traits::{LedgerOracle, LedgerResult};
use crate::config::SecretString;
use crate::domain::{LedgerError, TrialId};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct HashRecord {
    hash: String,
}

/// Ledger reached over HTTP
///
/// # Example
///
/// ```no_run
/// use trialchain::adapters::ledger::{HttpLedger, LedgerOracle};
/// use trialchain::domain::TrialId;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ledger = HttpLedger::new(
///     "https://ledger-gateway.example.com",
///     "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7",
///     "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7",
///     None,
///     Duration::from_secs(10),
/// )?;
/// let hash = ledger.fetch(&TrialId::new("t-1")?).await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpLedger {
    base_url: String,
    publish_address: String,
    fetch_address: String,
    api_token: Option<SecretString>,
    client: Client,
}

impl HttpLedger {
    /// Create a gateway client
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unavailable` if the HTTP client cannot be built.
    ///
    /// Both addresses are lowercased before they appear in request paths.
    pub fn new(
        base_url: impl Into<String>,
        publish_address: impl Into<String>,
        fetch_address: impl Into<String>,
        api_token: Option<SecretString>,
        timeout: Duration,
    ) -> LedgerResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| {
                LedgerError::Unavailable(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            publish_address: publish_address.into().to_lowercase(),
            fetch_address: fetch_address.into().to_lowercase(),
            api_token,
            client,
        })
    }

    fn hash_url(&self, address: &str, trial_id: &TrialId) -> String {
        format!(
            "{}/contracts/{}/hashes/{}",
            self.base_url, address, trial_id
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => {
                let token: &str = token.expose_secret().as_ref();
                request.bearer_auth(token)
            }
            None => request,
        }
    }
}

impl std::fmt::Debug for HttpLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLedger")
            .field("base_url", &self.base_url)
            .field("publish_address", &self.publish_address)
            .field("fetch_address", &self.fetch_address)
            .field("api_token", &self.api_token)
            .finish()
    }
}

fn transport_error(e: reqwest::Error) -> LedgerError {
    LedgerError::Unavailable(format!("Ledger gateway request failed: {e}"))
}

#[async_trait]
impl LedgerOracle for HttpLedger {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn publish(&self, trial_id: &TrialId, hash: &str) -> LedgerResult<()> {
        let url = self.hash_url(&self.publish_address, trial_id);
        let request = self.client.put(&url).json(&HashRecord {
            hash: hash.to_string(),
        });

        let resp = self
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Unavailable(format!(
                "Publishing hash for trial {trial_id} failed with status {status}: {body}"
            )));
        }

        Ok(())
    }

    async fn fetch(&self, trial_id: &TrialId) -> LedgerResult<String> {
        let url = self.hash_url(&self.fetch_address, trial_id);
        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LedgerError::HashNotFound(trial_id.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Unavailable(format!(
                "Fetching hash for trial {trial_id} failed with status {status}: {body}"
            )));
        }

        let record: HashRecord = resp.json().await.map_err(|e| {
            LedgerError::InvalidResponse(format!(
                "Unexpected ledger response for trial {trial_id}: {e}"
            ))
        })?;

        if record.hash.is_empty() {
            return Err(LedgerError::HashNotFound(trial_id.to_string()));
        }
        Ok(record.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    const ADDR: &str = "0xcf3cc873c988eb635712c8ab7c9a4f6a2376efc7";
    const CHECKSUMMED: &str = "0xCf3cC873C988eb635712C8AB7c9a4F6A2376EFc7";

    fn ledger(base_url: &str, token: Option<&str>) -> HttpLedger {
        HttpLedger::new(
            base_url,
            ADDR,
            ADDR,
            token.map(|t| secret_string(t.to_string())),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_hash_url_trims_trailing_slash() {
        let ledger = ledger("https://ledger.example.com/", None);
        let trial_id = TrialId::new("t-1").unwrap();
        assert_eq!(
            ledger.hash_url(ADDR, &trial_id),
            format!("https://ledger.example.com/contracts/{ADDR}/hashes/t-1")
        );
    }

    #[tokio::test]
    async fn test_checksummed_addresses_use_lowercase_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", format!("/contracts/{ADDR}/hashes/t-9").as_str())
            .with_status(200)
            .create_async()
            .await;

        let ledger = HttpLedger::new(
            server.url(),
            CHECKSUMMED,
            CHECKSUMMED,
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        ledger
            .publish(&TrialId::new("t-9").unwrap(), "abc")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_debug_redacts_token() {
        let ledger = ledger("https://ledger.example.com", Some("very-secret"));
        let debug_output = format!("{ledger:?}");
        assert!(!debug_output.contains("very-secret"));
    }

    #[tokio::test]
    async fn test_publish_sends_hash_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", format!("/contracts/{ADDR}/hashes/t-1").as_str())
            .match_header("authorization", "Bearer tok")
            .match_body(mockito::Matcher::Json(serde_json::json!({"hash": "abc"})))
            .with_status(200)
            .create_async()
            .await;

        let ledger = ledger(&server.url(), Some("tok"));
        ledger
            .publish(&TrialId::new("t-1").unwrap(), "abc")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_returns_hash() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/contracts/{ADDR}/hashes/t-1").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"hash":"abc"}"#)
            .create_async()
            .await;

        let ledger = ledger(&server.url(), None);
        let hash = ledger.fetch(&TrialId::new("t-1").unwrap()).await.unwrap();
        assert_eq!(hash, "abc");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/contracts/{ADDR}/hashes/t-2").as_str())
            .with_status(404)
            .create_async()
            .await;

        let ledger = ledger(&server.url(), None);
        let err = ledger.fetch(&TrialId::new("t-2").unwrap()).await.unwrap_err();
        assert!(matches!(err, LedgerError::HashNotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_empty_hash_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/contracts/{ADDR}/hashes/t-3").as_str())
            .with_status(200)
            .with_body(r#"{"hash":""}"#)
            .create_async()
            .await;

        let ledger = ledger(&server.url(), None);
        let err = ledger.fetch(&TrialId::new("t-3").unwrap()).await.unwrap_err();
        assert!(matches!(err, LedgerError::HashNotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", format!("/contracts/{ADDR}/hashes/t-4").as_str())
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let ledger = ledger(&server.url(), None);
        let err = ledger
            .publish(&TrialId::new("t-4").unwrap(), "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/contracts/{ADDR}/hashes/t-5").as_str())
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let ledger = ledger(&server.url(), None);
        let err = ledger.fetch(&TrialId::new("t-5").unwrap()).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_unavailable() {
        let ledger = ledger("http://127.0.0.1:9", None);
        let err = ledger.fetch(&TrialId::new("t-6").unwrap()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(_)));
    }
}
