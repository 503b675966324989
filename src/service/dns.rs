use serde::{Deserialize, Serialize};

use super::{PAGE_SIZE, collect_pages};
use crate::aliyun::{ApiError, RpcClient};
use crate::model::{Domain, DomainRecord};

pub const VERSION: &str = "2015-01-09";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainsRequest {
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct DomainList {
    #[serde(default, rename = "Domain")]
    items: Vec<Domain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainsResponse {
    #[serde(default)]
    domains: DomainList,
    #[serde(default)]
    total_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainRecordsRequest<'a> {
    domain_name: &'a str,
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct RecordList {
    #[serde(default, rename = "Record")]
    items: Vec<DomainRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainRecordsResponse {
    #[serde(default)]
    domain_records: RecordList,
    #[serde(default)]
    total_count: u64,
}

pub async fn list_domains(client: &RpcClient) -> Result<Vec<Domain>, ApiError> {
    collect_pages(PAGE_SIZE, |page_number| async move {
        let response: DescribeDomainsResponse = client
            .call(
                "DescribeDomains",
                &DescribeDomainsRequest {
                    page_number,
                    page_size: PAGE_SIZE,
                },
            )
            .await?;
        Ok((response.domains.items, response.total_count))
    })
    .await
}

pub async fn list_records(client: &RpcClient, domain: &str) -> Result<Vec<DomainRecord>, ApiError> {
    collect_pages(PAGE_SIZE, |page_number| async move {
        let response: DescribeDomainRecordsResponse = client
            .call(
                "DescribeDomainRecords",
                &DescribeDomainRecordsRequest {
                    domain_name: domain,
                    page_number,
                    page_size: PAGE_SIZE,
                },
            )
            .await?;
        Ok((response.domain_records.items, response.total_count))
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_response_shape() {
        let response: DescribeDomainRecordsResponse = serde_json::from_str(
            r#"{"TotalCount": 2, "DomainRecords": {"Record": [
                {"RecordId": "1", "RR": "@", "Type": "A", "Value": "1.1.1.1", "TTL": 600},
                {"RecordId": "2", "RR": "www", "Type": "CNAME", "Value": "example.com", "TTL": 600}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(response.domain_records.items.len(), 2);
        assert_eq!(response.domain_records.items[1].rr, "www");
    }

    #[test]
    fn test_missing_list_is_empty() {
        let response: DescribeDomainsResponse =
            serde_json::from_str(r#"{"TotalCount": 0}"#).unwrap();
        assert!(response.domains.items.is_empty());
    }
}
