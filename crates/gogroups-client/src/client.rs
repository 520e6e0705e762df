//! HTTP client for the `/api/groups` endpoint.
//!
//! Issues exactly one GET per call; there is no retry. Both response shapes
//! decode into [`GroupsPayload`].

use std::future::Future;
use std::time::Duration;

use gogroups_core::{AppConfig, DataSource, GroupsPayload};
use reqwest::{Client, Url};

use crate::error::ClientError;

const GROUPS_PATH: &str = "api/groups";

/// Client for a groups server.
///
/// Use [`GroupsClient::from_config`] in binaries or
/// [`GroupsClient::new`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GroupsClient {
    client: Client,
    groups_url: Url,
}

impl GroupsClient {
    /// Creates a client for the server rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            groups_url: groups_url(base_url)?,
        })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`GroupsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the group list.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a groups payload.
    pub async fn get_groups(&self) -> Result<GroupsPayload, ClientError> {
        tracing::debug!(url = %self.groups_url, "fetching groups");
        let response = self.client.get(self.groups_url.clone()).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let trimmed = body.trim();
            let body = if trimmed.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                trimmed.to_string()
            };
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: self.groups_url.to_string(),
            source: e,
        })
    }
}

impl DataSource for GroupsClient {
    type Error = ClientError;

    fn fetch_groups(&self) -> impl Future<Output = Result<GroupsPayload, ClientError>> + Send {
        self.get_groups()
    }
}

/// Resolves `{base_url}/api/groups`, keeping any path prefix on the base.
fn groups_url(base_url: &str) -> Result<Url, ClientError> {
    // Exactly one trailing slash so `join` appends instead of replacing the
    // last path segment.
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    base.join(GROUPS_PATH).map_err(|e| invalid(e.to_string()))
}
