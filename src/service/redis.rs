use serde::{Deserialize, Serialize};

use super::{PAGE_SIZE, collect_pages};
use crate::aliyun::{ApiError, RpcClient};
use crate::model::{CacheAccount, CacheInstance};

pub const VERSION: &str = "2015-01-01";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesRequest<'a> {
    region_id: &'a str,
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct InstanceList {
    #[serde(default, rename = "KVStoreInstance")]
    items: Vec<CacheInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesResponse {
    #[serde(default)]
    instances: InstanceList,
    #[serde(default)]
    total_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAccountsRequest<'a> {
    instance_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AccountList {
    #[serde(default, rename = "Account")]
    items: Vec<CacheAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAccountsResponse {
    #[serde(default)]
    accounts: AccountList,
}

pub async fn list_instances(client: &RpcClient, region: &str) -> Result<Vec<CacheInstance>, ApiError> {
    collect_pages(PAGE_SIZE, |page_number| async move {
        let response: DescribeInstancesResponse = client
            .call(
                "DescribeInstances",
                &DescribeInstancesRequest {
                    region_id: region,
                    page_number,
                    page_size: PAGE_SIZE,
                },
            )
            .await?;
        Ok((response.instances.items, response.total_count))
    })
    .await
}

pub async fn list_accounts(client: &RpcClient, instance_id: &str) -> Result<Vec<CacheAccount>, ApiError> {
    let response: DescribeAccountsResponse = client
        .call("DescribeAccounts", &DescribeAccountsRequest { instance_id })
        .await?;
    Ok(response.accounts.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_response_shape() {
        let response: DescribeInstancesResponse = serde_json::from_str(
            r#"{"TotalCount": 1, "Instances": {"KVStoreInstance": [
                {"InstanceId": "r-1", "InstanceName": "cache", "Capacity": 1024,
                 "ConnectionDomain": "r-1.redis.rds.aliyuncs.com"}]}}"#,
        )
        .unwrap();
        assert_eq!(response.instances.items[0].capacity, 1024);
    }
}
