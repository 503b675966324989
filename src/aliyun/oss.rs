use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, error};

use super::signer::{OSS_UNSIGNED_PAYLOAD, OssRequest, encode_pairs, sign_oss};
use super::{ApiError, Credentials};
use crate::model::{Bucket, ObjectPage, ObjectSummary};

const BUCKET_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
struct BucketList {
    #[serde(default, rename = "Bucket")]
    items: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListAllMyBucketsResult {
    #[serde(default)]
    buckets: BucketList,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    next_marker: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListBucketResult {
    #[serde(default)]
    contents: Vec<ObjectSummary>,
    #[serde(default)]
    is_truncated: bool,
    #[serde(default)]
    next_marker: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OssErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
}

/// OSS REST client. Service calls go to the profile's endpoint; bucket
/// calls go to the bucket's own regional endpoint.
#[derive(Clone)]
pub struct OssClient {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    /// Service endpoint host, e.g. `oss-cn-hangzhou.aliyuncs.com`.
    endpoint: String,
    region: String,
}

impl OssClient {
    pub fn new(
        http: reqwest::Client,
        credentials: Arc<Credentials>,
        endpoint: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credentials,
            endpoint: endpoint.into(),
            region: region.into(),
        }
    }

    /// List every bucket, following `NextMarker` until the listing ends.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, ApiError> {
        let mut buckets = Vec::new();
        let mut marker = String::new();
        loop {
            let mut query = BTreeMap::new();
            query.insert("max-keys".to_string(), BUCKET_PAGE_SIZE.to_string());
            if !marker.is_empty() {
                query.insert("marker".to_string(), marker.clone());
            }

            let body = self.get(&self.endpoint, None, &self.region, &query).await?;
            let page: ListAllMyBucketsResult = quick_xml::de::from_str(&body)?;
            buckets.extend(page.buckets.items);

            if !page.is_truncated || page.next_marker.is_empty() {
                break;
            }
            marker = page.next_marker;
        }
        debug!(count = buckets.len(), "Listed OSS buckets");
        Ok(buckets)
    }

    /// Fetch one page of objects starting after `marker`.
    pub async fn list_objects(
        &self,
        bucket: &Bucket,
        marker: &str,
        max_keys: u32,
    ) -> Result<ObjectPage, ApiError> {
        let mut query = BTreeMap::new();
        query.insert("max-keys".to_string(), max_keys.to_string());
        if !marker.is_empty() {
            query.insert("marker".to_string(), marker.to_string());
        }

        let (host, region) = self.bucket_route(bucket);
        let body = self
            .get(&host, Some(&bucket.name), &region, &query)
            .await?;
        let page = parse_object_page(&body)?;
        debug!(
            bucket = %bucket.name,
            count = page.objects.len(),
            truncated = page.is_truncated,
            "Listed OSS objects"
        );
        Ok(page)
    }

    /// Host and signing region for a bucket, derived from its `Location`.
    fn bucket_route(&self, bucket: &Bucket) -> (String, String) {
        if bucket.location.is_empty() {
            return (
                format!("{}.{}", bucket.name, self.endpoint),
                self.region.clone(),
            );
        }
        let region = bucket
            .location
            .strip_prefix("oss-")
            .unwrap_or(&bucket.location)
            .to_string();
        (
            format!("{}.{}.aliyuncs.com", bucket.name, bucket.location),
            region,
        )
    }

    async fn get(
        &self,
        host: &str,
        bucket: Option<&str>,
        region: &str,
        query: &BTreeMap<String, String>,
    ) -> Result<String, ApiError> {
        let signed = sign_oss(
            &self.credentials,
            &OssRequest {
                method: "GET",
                bucket,
                query,
                region,
                now: Utc::now(),
            },
        )?;

        let url = format!("https://{host}/?{}", encode_pairs(query));
        let response = self
            .http
            .get(&url)
            .header("x-oss-date", &signed.date)
            .header("x-oss-content-sha256", OSS_UNSIGNED_PAYLOAD)
            .header("Authorization", signed.authorization)
            .send()
            .await
            .map_err(|source| ApiError::Http {
                endpoint: host.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| ApiError::Http {
            endpoint: host.to_string(),
            source,
        })?;

        if status >= 400 {
            let err = parse_error(status, &body);
            error!(host, error = %err, "OSS request failed");
            return Err(err);
        }
        Ok(body)
    }
}

fn parse_object_page(body: &str) -> Result<ObjectPage, ApiError> {
    let result: ListBucketResult = quick_xml::de::from_str(body)?;
    Ok(ObjectPage {
        objects: result.contents,
        is_truncated: result.is_truncated,
        next_marker: result.next_marker,
    })
}

fn parse_error(status: u16, body: &str) -> ApiError {
    match quick_xml::de::from_str::<OssErrorBody>(body) {
        Ok(err) if !err.code.is_empty() => ApiError::Api {
            code: err.code,
            message: err.message,
            request_id: (!err.request_id.is_empty()).then_some(err.request_id),
        },
        _ => ApiError::Status {
            status,
            body: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OssClient {
        OssClient::new(
            reqwest::Client::new(),
            Arc::new(Credentials::new("ak", "sk")),
            "oss-cn-hangzhou.aliyuncs.com",
            "cn-hangzhou",
        )
    }

    #[test]
    fn test_parse_bucket_listing() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult>
  <Owner><ID>512</ID><DisplayName>512</DisplayName></Owner>
  <Buckets>
    <Bucket>
      <CreationDate>2014-02-17T18:12:43.000Z</CreationDate>
      <ExtranetEndpoint>oss-cn-shanghai.aliyuncs.com</ExtranetEndpoint>
      <IntranetEndpoint>oss-cn-shanghai-internal.aliyuncs.com</IntranetEndpoint>
      <Location>oss-cn-shanghai</Location>
      <Name>app-base-oss</Name>
      <Region>cn-shanghai</Region>
      <StorageClass>Standard</StorageClass>
    </Bucket>
    <Bucket>
      <CreationDate>2014-02-25T11:21:04.000Z</CreationDate>
      <Location>oss-cn-hangzhou</Location>
      <Name>mybucket</Name>
      <StorageClass>IA</StorageClass>
    </Bucket>
  </Buckets>
  <IsTruncated>true</IsTruncated>
  <NextMarker>mybucket</NextMarker>
</ListAllMyBucketsResult>"#;

        let page: ListAllMyBucketsResult = quick_xml::de::from_str(body).unwrap();
        assert_eq!(page.buckets.items.len(), 2);
        assert_eq!(page.buckets.items[0].location, "oss-cn-shanghai");
        assert_eq!(page.buckets.items[1].storage_class, "IA");
        assert!(page.is_truncated);
        assert_eq!(page.next_marker, "mybucket");
    }

    #[test]
    fn test_parse_object_page() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
  <Name>photos</Name>
  <Prefix></Prefix>
  <Marker></Marker>
  <MaxKeys>20</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>2024/a.jpg</Key>
    <LastModified>2024-01-01T00:00:00.000Z</LastModified>
    <ETag>"5B3C1A2E053D763E1B002CC607C5A0FE"</ETag>
    <Type>Normal</Type>
    <Size>344606</Size>
    <StorageClass>Standard</StorageClass>
  </Contents>
  <Contents>
    <Key>2024/b.jpg</Key>
    <Size>10</Size>
  </Contents>
</ListBucketResult>"#;

        let page = parse_object_page(body).unwrap();
        assert_eq!(page.objects.len(), 2);
        assert_eq!(page.objects[0].size, 344_606);
        assert_eq!(page.objects[0].etag, "\"5B3C1A2E053D763E1B002CC607C5A0FE\"");
        assert!(!page.is_truncated);
        assert!(page.next_marker.is_empty());
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>The bucket you are attempting to access must be addressed using the specified endpoint.</Message>
  <RequestId>5C3D9175B6FC201293AD****</RequestId>
</Error>"#;
        match parse_error(403, body) {
            ApiError::Api { code, .. } => assert_eq!(code, "AccessDenied"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_error(500, "oops"),
            ApiError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_bucket_route_uses_location() {
        let bucket = Bucket {
            name: "logs".into(),
            location: "oss-ap-southeast-1".into(),
            ..Bucket::default()
        };
        let (host, region) = client().bucket_route(&bucket);
        assert_eq!(host, "logs.oss-ap-southeast-1.aliyuncs.com");
        assert_eq!(region, "ap-southeast-1");

        let unknown = Bucket {
            name: "old".into(),
            ..Bucket::default()
        };
        let (host, region) = client().bucket_route(&unknown);
        assert_eq!(host, "old.oss-cn-hangzhou.aliyuncs.com");
        assert_eq!(region, "cn-hangzhou");
    }
}
