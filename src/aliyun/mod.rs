//! Signed HTTP clients for the Aliyun APIs.
//!
//! RPC-style products (ECS, DNS, SLB, RDS, R-KVStore, ONS) share
//! [`RpcClient`], which signs every call with ACS3-HMAC-SHA256. OSS speaks
//! REST with XML bodies and is signed with OSS4-HMAC-SHA256 by [`OssClient`].

use std::fmt;
use std::time::Duration;

use hmac::{Hmac, Mac};
use sha2::Sha256;

mod error;
pub mod oss;
pub mod rpc;
mod signer;

pub use error::ApiError;
pub use oss::OssClient;
pub use rpc::{Endpoint, RpcClient};

type HmacSha256 = Hmac<Sha256>;

/// Access key pair used to sign requests.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .finish()
    }
}

/// Shared HTTP client with the connect and request timeouts every product uses.
pub fn http_client() -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|source| ApiError::Http {
            endpoint: "client builder".to_string(),
            source,
        })
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ApiError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| ApiError::InvalidKey)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
