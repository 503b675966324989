use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{PAGE_SIZE, collect_pages};
use crate::aliyun::{ApiError, RpcClient};
use crate::model::{Listener, LoadBalancer};

pub const VERSION: &str = "2014-05-15";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeLoadBalancersRequest<'a> {
    region_id: &'a str,
    page_number: u32,
    page_size: u32,
}

#[derive(Debug, Default, Deserialize)]
struct LoadBalancerList {
    #[serde(default, rename = "LoadBalancer")]
    items: Vec<LoadBalancer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeLoadBalancersResponse {
    #[serde(default)]
    load_balancers: LoadBalancerList,
    #[serde(default)]
    total_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoadBalancerScoped<'a> {
    region_id: &'a str,
    load_balancer_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PortAndProtocol {
    listener_port: i64,
    #[serde(default)]
    listener_protocol: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PortAndProtocolList {
    #[serde(default)]
    listener_port_and_protocol: Vec<PortAndProtocol>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeLoadBalancerAttributeResponse {
    #[serde(default)]
    listener_ports_and_protocol: PortAndProtocolList,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListenerScoped<'a> {
    region_id: &'a str,
    load_balancer_id: &'a str,
    listener_port: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListenerAttributeResponse {
    #[serde(default)]
    backend_server_port: i64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    health_check: String,
    #[serde(default)]
    scheduler: String,
    #[serde(default, rename = "VServerGroupId")]
    vserver_group_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VServerGroupScoped<'a> {
    region_id: &'a str,
    #[serde(rename = "VServerGroupId")]
    vserver_group_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct VServerGroupAttributeResponse {
    #[serde(default, rename = "VServerGroupName")]
    vserver_group_name: String,
}

pub async fn list_load_balancers(
    client: &RpcClient,
    region: &str,
) -> Result<Vec<LoadBalancer>, ApiError> {
    collect_pages(PAGE_SIZE, |page_number| async move {
        let response: DescribeLoadBalancersResponse = client
            .call(
                "DescribeLoadBalancers",
                &DescribeLoadBalancersRequest {
                    region_id: region,
                    page_number,
                    page_size: PAGE_SIZE,
                },
            )
            .await?;
        Ok((response.load_balancers.items, response.total_count))
    })
    .await
}

/// Map a listener protocol to its attribute API.
fn attribute_action(protocol: &str) -> Option<&'static str> {
    match protocol.to_ascii_lowercase().as_str() {
        "http" => Some("DescribeLoadBalancerHTTPListenerAttribute"),
        "https" => Some("DescribeLoadBalancerHTTPSListenerAttribute"),
        "tcp" => Some("DescribeLoadBalancerTCPListenerAttribute"),
        "udp" => Some("DescribeLoadBalancerUDPListenerAttribute"),
        _ => None,
    }
}

/// Every listener of `load_balancer_id` with its attributes. A listener whose
/// attributes cannot be read becomes an "Unknown" row instead of failing the list.
pub async fn list_listeners(
    client: &RpcClient,
    region: &str,
    load_balancer_id: &str,
) -> Result<Vec<Listener>, ApiError> {
    let attribute: DescribeLoadBalancerAttributeResponse = client
        .call(
            "DescribeLoadBalancerAttribute",
            &LoadBalancerScoped {
                region_id: region,
                load_balancer_id,
            },
        )
        .await?;

    let ports = attribute.listener_ports_and_protocol.listener_port_and_protocol;
    let listeners = join_all(ports.iter().map(|entry| async move {
        match describe_listener(client, region, load_balancer_id, entry).await {
            Ok(listener) => listener,
            Err(err) => {
                warn!(
                    load_balancer_id,
                    port = entry.listener_port,
                    error = %err,
                    "Failed to describe listener"
                );
                Listener::unknown(load_balancer_id, entry.listener_port)
            }
        }
    }))
    .await;

    Ok(listeners)
}

async fn describe_listener(
    client: &RpcClient,
    region: &str,
    load_balancer_id: &str,
    entry: &PortAndProtocol,
) -> Result<Listener, ApiError> {
    let Some(action) = attribute_action(&entry.listener_protocol) else {
        return Ok(Listener::unknown(load_balancer_id, entry.listener_port));
    };

    let detail: ListenerAttributeResponse = client
        .call(
            action,
            &ListenerScoped {
                region_id: region,
                load_balancer_id,
                listener_port: entry.listener_port,
            },
        )
        .await?;

    let mut listener = Listener::new(
        load_balancer_id,
        &entry.listener_protocol.to_ascii_uppercase(),
        entry.listener_port,
    );
    listener.backend_port = detail.backend_server_port;
    listener.status = detail.status;
    listener.health_check = detail.health_check;
    listener.scheduler = detail.scheduler;

    if !detail.vserver_group_id.is_empty() {
        // The group name is cosmetic; the id is still shown without it.
        match client
            .call::<VServerGroupAttributeResponse, _>(
                "DescribeVServerGroupAttribute",
                &VServerGroupScoped {
                    region_id: region,
                    vserver_group_id: &detail.vserver_group_id,
                },
            )
            .await
        {
            Ok(group) => listener.vserver_group_name = group.vserver_group_name,
            Err(err) => warn!(group = %detail.vserver_group_id, error = %err, "Failed to resolve VServer group"),
        }
        listener.vserver_group_id = detail.vserver_group_id;
    }

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_action_by_protocol() {
        assert_eq!(
            attribute_action("https"),
            Some("DescribeLoadBalancerHTTPSListenerAttribute")
        );
        assert_eq!(
            attribute_action("TCP"),
            Some("DescribeLoadBalancerTCPListenerAttribute")
        );
        assert_eq!(attribute_action("quic"), None);
    }

    #[test]
    fn test_attribute_response_shape() {
        let response: DescribeLoadBalancerAttributeResponse = serde_json::from_str(
            r#"{"LoadBalancerId": "lb-1", "ListenerPorts": {"ListenerPort": [80, 443]},
                "ListenerPortsAndProtocol": {"ListenerPortAndProtocol": [
                    {"ListenerPort": 80, "ListenerProtocol": "http"},
                    {"ListenerPort": 443, "ListenerProtocol": "https"}
                ]}}"#,
        )
        .unwrap();
        let ports = response.listener_ports_and_protocol.listener_port_and_protocol;
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[1].listener_protocol, "https");
    }
}
