//! Request signing for both Aliyun signature schemes.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{ApiError, Credentials, hmac_sha256};

pub const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const ACS3_SIGNED_HEADERS: &str =
    "host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version";

pub const OSS_UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Inputs that vary per RPC request.
pub struct RpcRequest<'a> {
    pub host: &'a str,
    pub version: &'a str,
    pub action: &'a str,
    pub query_string: &'a str,
    pub timestamp: &'a str,
    pub nonce: &'a str,
}

/// Build the ACS3-HMAC-SHA256 `Authorization` header.
pub fn sign_rpc(credentials: &Credentials, req: &RpcRequest<'_>) -> Result<String, ApiError> {
    let RpcRequest {
        host,
        version,
        action,
        query_string,
        timestamp,
        nonce,
    } = req;

    let canonical_headers = format!(
        "host:{host}\nx-acs-action:{action}\nx-acs-content-sha256:{EMPTY_BODY_SHA256}\nx-acs-date:{timestamp}\nx-acs-signature-nonce:{nonce}\nx-acs-version:{version}\n"
    );
    let canonical_request = format!(
        "POST\n/\n{query_string}\n{canonical_headers}\n{ACS3_SIGNED_HEADERS}\n{EMPTY_BODY_SHA256}"
    );
    tracing::trace!(%canonical_request, "ACS3 canonical request");

    let hashed = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    let string_to_sign = format!("ACS3-HMAC-SHA256\n{hashed}");
    let signature = hex::encode(hmac_sha256(
        credentials.access_key_secret.as_bytes(),
        string_to_sign.as_bytes(),
    )?);

    Ok(format!(
        "ACS3-HMAC-SHA256 Credential={},SignedHeaders={ACS3_SIGNED_HEADERS},Signature={signature}",
        credentials.access_key_id
    ))
}

/// Flatten request parameters into `a.b` / `a.1` keys, sorted.
fn flatten_value(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_value(&key, v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_value(&format!("{prefix}.{}", i + 1), v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Null => {}
    }
}

/// Serialize any request struct into the canonical (sorted, RFC 3986
/// encoded) query string used both on the wire and in the signature.
pub fn to_query_string<T: Serialize>(params: &T) -> Result<String, ApiError> {
    let value = serde_json::to_value(params)?;
    let mut flat = BTreeMap::new();
    flatten_value("", &value, &mut flat);
    Ok(encode_pairs(&flat))
}

pub fn encode_pairs(pairs: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (k, v) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        let _ = write!(out, "{}={}", urlencoding::encode(k), urlencoding::encode(v));
    }
    out
}

/// Inputs for an OSS V4 request with no body.
pub struct OssRequest<'a> {
    pub method: &'a str,
    /// `None` for service-level calls such as ListBuckets.
    pub bucket: Option<&'a str>,
    pub query: &'a BTreeMap<String, String>,
    pub region: &'a str,
    pub now: DateTime<Utc>,
}

pub struct OssSignature {
    pub authorization: String,
    pub date: String,
}

/// Build the OSS4-HMAC-SHA256 `Authorization` header and matching `x-oss-date`.
pub fn sign_oss(credentials: &Credentials, req: &OssRequest<'_>) -> Result<OssSignature, ApiError> {
    let date = req.now.format("%Y%m%dT%H%M%SZ").to_string();
    let day = req.now.format("%Y%m%d").to_string();
    let scope = format!("{day}/{}/oss/aliyun_v4_request", req.region);

    let canonical_uri = req
        .bucket
        .map_or_else(|| "/".to_string(), |b| format!("/{}/", urlencoding::encode(b)));
    let canonical_headers =
        format!("x-oss-content-sha256:{OSS_UNSIGNED_PAYLOAD}\nx-oss-date:{date}\n");
    let canonical_request = format!(
        "{}\n{canonical_uri}\n{}\n{canonical_headers}\n\n{OSS_UNSIGNED_PAYLOAD}",
        req.method,
        encode_pairs(req.query)
    );
    tracing::trace!(%canonical_request, "OSS canonical request");

    let string_to_sign = format!(
        "OSS4-HMAC-SHA256\n{date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let mut key = hmac_sha256(
        format!("aliyun_v4{}", credentials.access_key_secret).as_bytes(),
        day.as_bytes(),
    )?;
    for part in [req.region, "oss", "aliyun_v4_request"] {
        key = hmac_sha256(&key, part.as_bytes())?;
    }
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(OssSignature {
        authorization: format!(
            "OSS4-HMAC-SHA256 Credential={}/{scope},Signature={signature}",
            credentials.access_key_id
        ),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn creds(id: &str, secret: &str) -> Credentials {
        Credentials::new(id, secret)
    }

    fn rpc<'a>(action: &'a str, query_string: &'a str) -> RpcRequest<'a> {
        RpcRequest {
            host: "alidns.cn-hangzhou.aliyuncs.com",
            version: "2015-01-09",
            action,
            query_string,
            timestamp: "2024-01-15T08:00:00Z",
            nonce: "test-nonce-12345",
        }
    }

    fn signature_of(auth: &str) -> &str {
        auth.split("Signature=").nth(1).unwrap()
    }

    #[test]
    fn test_rpc_header_format() {
        let auth = sign_rpc(&creds("key-id", "secret"), &rpc("DescribeDomains", "")).unwrap();
        assert!(auth.starts_with("ACS3-HMAC-SHA256 Credential=key-id,"));

        let signed = auth
            .split("SignedHeaders=")
            .nth(1)
            .and_then(|s| s.split(',').next())
            .unwrap();
        assert_eq!(signed.split(';').count(), 6);

        let sig = signature_of(&auth);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_rpc_signature_is_deterministic() {
        let c = creds("key-id", "secret");
        let a = sign_rpc(&c, &rpc("DescribeDomains", "PageSize=100")).unwrap();
        let b = sign_rpc(&c, &rpc("DescribeDomains", "PageSize=100")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rpc_signature_depends_on_inputs() {
        let c = creds("key-id", "secret");
        let base = sign_rpc(&c, &rpc("DescribeDomains", "")).unwrap();
        let other_action = sign_rpc(&c, &rpc("DescribeDomainRecords", "")).unwrap();
        let other_secret = sign_rpc(&creds("key-id", "other"), &rpc("DescribeDomains", "")).unwrap();
        let other_query = sign_rpc(&c, &rpc("DescribeDomains", "PageNumber=2")).unwrap();

        assert_ne!(signature_of(&base), signature_of(&other_action));
        assert_ne!(signature_of(&base), signature_of(&other_secret));
        assert_ne!(signature_of(&base), signature_of(&other_query));
    }

    #[test]
    fn test_rpc_signature_snapshot() {
        let auth = sign_rpc(
            &creds("LTAI5tTestKeyId", "TestSecretKey123456"),
            &rpc("DescribeDomainRecords", "DomainName=example.com"),
        )
        .unwrap();
        assert_eq!(
            auth,
            "ACS3-HMAC-SHA256 Credential=LTAI5tTestKeyId,\
             SignedHeaders=host;x-acs-action;x-acs-content-sha256;\
             x-acs-date;x-acs-signature-nonce;x-acs-version,\
             Signature=9c4173ede0946854e402679d086862a853ada5d1b83c34216ede75a499d50afd"
        );
    }

    #[test]
    fn test_query_string_is_sorted_and_encoded() {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Params {
            region_id: String,
            page_size: u32,
            domain_name: Option<String>,
            tag: Vec<Value>,
        }

        let qs = to_query_string(&Params {
            region_id: "cn-hangzhou".into(),
            page_size: 100,
            domain_name: None,
            tag: vec![json!({"Key": "env", "Value": "a b/c"})],
        })
        .unwrap();

        assert_eq!(
            qs,
            "PageSize=100&RegionId=cn-hangzhou&Tag.1.Key=env&Tag.1.Value=a%20b%2Fc"
        );
    }

    #[test]
    fn test_non_ascii_is_percent_encoded() {
        let mut pairs = BTreeMap::new();
        pairs.insert("DomainName".to_string(), "你好.com".to_string());
        assert_eq!(encode_pairs(&pairs), "DomainName=%E4%BD%A0%E5%A5%BD.com");
    }

    #[test]
    fn test_oss_signature_shape() {
        let mut query = BTreeMap::new();
        query.insert("max-keys".to_string(), "20".to_string());
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        let signed = sign_oss(
            &creds("ak", "sk"),
            &OssRequest {
                method: "GET",
                bucket: Some("photos"),
                query: &query,
                region: "cn-hangzhou",
                now,
            },
        )
        .unwrap();

        assert_eq!(signed.date, "20240301T123000Z");
        assert!(signed.authorization.starts_with(
            "OSS4-HMAC-SHA256 Credential=ak/20240301/cn-hangzhou/oss/aliyun_v4_request,Signature="
        ));
        assert_eq!(signature_of(&signed.authorization).len(), 64);
    }

    #[test]
    fn test_oss_signature_covers_bucket_and_query() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let empty = BTreeMap::new();
        let mut paged = BTreeMap::new();
        paged.insert("marker".to_string(), "photos/0020.jpg".to_string());

        let sign = |bucket, query| {
            sign_oss(
                &creds("ak", "sk"),
                &OssRequest {
                    method: "GET",
                    bucket,
                    query,
                    region: "cn-hangzhou",
                    now,
                },
            )
            .unwrap()
            .authorization
        };

        let service = sign(None, &empty);
        let bucket = sign(Some("photos"), &empty);
        let page = sign(Some("photos"), &paged);
        assert_ne!(signature_of(&service), signature_of(&bucket));
        assert_ne!(signature_of(&bucket), signature_of(&page));
    }
}
