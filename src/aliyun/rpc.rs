use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use super::signer::{EMPTY_BODY_SHA256, RpcRequest, sign_rpc, to_query_string};
use super::{ApiError, Credentials};

/// Host and API version of one RPC product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub version: &'static str,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, version: &'static str) -> Self {
        Self {
            host: host.into(),
            version,
        }
    }
}

/// ACS3-signed client for a single RPC product endpoint.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    credentials: Arc<Credentials>,
}

impl RpcClient {
    pub const fn new(http: reqwest::Client, endpoint: Endpoint, credentials: Arc<Credentials>) -> Self {
        Self {
            http,
            endpoint,
            credentials,
        }
    }

    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Call `action` with `params` serialized into the query string.
    pub async fn call<T: DeserializeOwned, P: Serialize>(
        &self,
        action: &str,
        params: &P,
    ) -> Result<T, ApiError> {
        let query_string = to_query_string(params)?;
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        let host = self.endpoint.host.as_str();

        let authorization = sign_rpc(
            &self.credentials,
            &RpcRequest {
                host,
                version: self.endpoint.version,
                action,
                query_string: &query_string,
                timestamp: &timestamp,
                nonce: &nonce,
            },
        )?;

        let url = if query_string.is_empty() {
            format!("https://{host}/")
        } else {
            format!("https://{host}/?{query_string}")
        };
        debug!(host, action, "Calling Aliyun API");

        let response = self
            .http
            .post(&url)
            .header("Host", host)
            .header("x-acs-action", action)
            .header("x-acs-version", self.endpoint.version)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                endpoint: format!("{host} ({action})"),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| ApiError::Http {
            endpoint: format!("{host} ({action})"),
            source,
        })?;

        decode_response(status, &body).inspect_err(|err| {
            error!(host, action, error = %err, "Aliyun API call failed");
        })
    }
}

/// Turn a raw response into `T`, surfacing `Code`/`Message` error bodies.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if status >= 400 => {
            return Err(ApiError::Status {
                status,
                body: body.to_string(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    if let (Some(code), Some(message)) = (
        value.get("Code").and_then(Value::as_str),
        value.get("Message").and_then(Value::as_str),
    ) {
        return Err(ApiError::Api {
            code: code.to_string(),
            message: message.to_string(),
            request_id: value
                .get("RequestId")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    if status >= 400 {
        return Err(ApiError::Status {
            status,
            body: body.to_string(),
        });
    }

    Ok(serde_json::from_value(value)?)
}
