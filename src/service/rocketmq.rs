use serde::{Deserialize, Serialize};

use crate::aliyun::{ApiError, RpcClient};
use crate::model::{MqGroup, MqInstance, MqTopic};

pub const VERSION: &str = "2019-02-14";

#[derive(Serialize)]
struct NoParams {}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceScoped<'a> {
    instance_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceData {
    #[serde(default, rename = "InstanceVO")]
    instance_vo: Vec<MqInstance>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TopicData {
    #[serde(default)]
    publish_info_do: Vec<MqTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GroupData {
    #[serde(default)]
    subscribe_info_do: Vec<MqGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DataResponse<T: Default> {
    #[serde(default)]
    data: T,
}

pub async fn list_instances(client: &RpcClient) -> Result<Vec<MqInstance>, ApiError> {
    let response: DataResponse<InstanceData> =
        client.call("OnsInstanceInServiceList", &NoParams {}).await?;
    Ok(response.data.instance_vo)
}

pub async fn list_topics(client: &RpcClient, instance_id: &str) -> Result<Vec<MqTopic>, ApiError> {
    let response: DataResponse<TopicData> = client
        .call("OnsTopicList", &InstanceScoped { instance_id })
        .await?;
    Ok(response.data.publish_info_do)
}

pub async fn list_groups(client: &RpcClient, instance_id: &str) -> Result<Vec<MqGroup>, ApiError> {
    let response: DataResponse<GroupData> = client
        .call("OnsGroupList", &InstanceScoped { instance_id })
        .await?;
    Ok(response.data.subscribe_info_do)
}
