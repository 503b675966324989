use serde::{Deserialize, Serialize};

use super::{PAGE_SIZE, collect_pages};
use crate::aliyun::{ApiError, RpcClient};
use crate::model::{Database, DbAccount, DbInstance};

pub const VERSION: &str = "2014-08-15";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDbInstancesRequest<'a> {
    region_id: &'a str,
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct DbInstanceList {
    #[serde(default, rename = "DBInstance")]
    items: Vec<DbInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDbInstancesResponse {
    #[serde(default)]
    items: DbInstanceList,
    #[serde(default)]
    total_record_count: u64,
}

#[derive(Serialize)]
struct InstanceScoped<'a> {
    #[serde(rename = "DBInstanceId")]
    db_instance_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseList {
    #[serde(default, rename = "Database")]
    items: Vec<Database>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDatabasesResponse {
    #[serde(default)]
    databases: DatabaseList,
}

#[derive(Debug, Default, Deserialize)]
struct AccountList {
    #[serde(default, rename = "DBInstanceAccount")]
    items: Vec<DbAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAccountsResponse {
    #[serde(default)]
    accounts: AccountList,
}

pub async fn list_instances(client: &RpcClient, region: &str) -> Result<Vec<DbInstance>, ApiError> {
    collect_pages(PAGE_SIZE, |page_number| async move {
        let response: DescribeDbInstancesResponse = client
            .call(
                "DescribeDBInstances",
                &DescribeDbInstancesRequest {
                    region_id: region,
                    page_number,
                    page_size: PAGE_SIZE,
                },
            )
            .await?;
        Ok((response.items.items, response.total_record_count))
    })
    .await
}

pub async fn list_databases(client: &RpcClient, instance_id: &str) -> Result<Vec<Database>, ApiError> {
    let response: DescribeDatabasesResponse = client
        .call(
            "DescribeDatabases",
            &InstanceScoped {
                db_instance_id: instance_id,
            },
        )
        .await?;
    Ok(response.databases.items)
}

pub async fn list_accounts(client: &RpcClient, instance_id: &str) -> Result<Vec<DbAccount>, ApiError> {
    let response: DescribeAccountsResponse = client
        .call(
            "DescribeAccounts",
            &InstanceScoped {
                db_instance_id: instance_id,
            },
        )
        .await?;
    Ok(response.accounts.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_response_shape() {
        let response: DescribeDbInstancesResponse = serde_json::from_str(
            r#"{"TotalRecordCount": 1, "PageRecordCount": 1,
                "Items": {"DBInstance": [{"DBInstanceId": "rm-1", "Engine": "MySQL",
                "EngineVersion": "8.0", "DBInstanceStatus": "Running"}]}}"#,
        )
        .unwrap();
        assert_eq!(response.total_record_count, 1);
        assert_eq!(response.items.items[0].engine, "MySQL");
    }

    #[test]
    fn test_scoped_request_key() {
        let qs = serde_json::to_value(InstanceScoped { db_instance_id: "rm-1" }).unwrap();
        assert_eq!(qs["DBInstanceId"], "rm-1");
    }
}
