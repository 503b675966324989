use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with an error code.
    #[error("{code}: {message}")]
    Api {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to decode XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("invalid signing key")]
    InvalidKey,
}
