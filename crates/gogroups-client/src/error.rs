use thiserror::Error;

/// Errors returned by [`GroupsClient`](crate::GroupsClient).
///
/// The display text of each variant is the failure payload itself, since it
/// is shown to the user verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `body` is the trimmed
    /// response body, or `HTTP <status>` when the body was empty.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    /// The response body could not be deserialized into a groups payload.
    #[error("could not decode {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
