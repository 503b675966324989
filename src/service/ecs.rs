use serde::{Deserialize, Serialize};

use super::{PAGE_SIZE, collect_pages};
use crate::aliyun::{ApiError, RpcClient};
use crate::model::EcsInstance;

pub const VERSION: &str = "2014-05-26";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesRequest<'a> {
    region_id: &'a str,
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct InstanceList {
    #[serde(default, rename = "Instance")]
    items: Vec<EcsInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstancesResponse {
    #[serde(default)]
    instances: InstanceList,
    #[serde(default)]
    total_count: u64,
}

pub async fn list_instances(client: &RpcClient, region: &str) -> Result<Vec<EcsInstance>, ApiError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape() {
        let response: DescribeInstancesResponse = serde_json::from_str(
            r#"{"RequestId": "r", "TotalCount": 1, "PageNumber": 1, "PageSize": 100,
                "Instances": {"Instance": [{"InstanceId": "i-1", "Cpu": 2, "Memory": 4096}]}}"#,
        )
        .unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.instances.items[0].instance_id, "i-1");
    }
}
