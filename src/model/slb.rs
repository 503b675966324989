use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadBalancer {
    pub load_balancer_id: String,
    #[serde(default)]
    pub load_balancer_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub load_balancer_spec: String,
    #[serde(default)]
    pub load_balancer_status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for LoadBalancer {
    fn identity(&self) -> &str {
        &self.load_balancer_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.load_balancer_id.clone(),
            self.load_balancer_name.clone(),
            self.address.clone(),
            self.load_balancer_spec.clone(),
            self.load_balancer_status.clone(),
        ]
    }
}

/// One listener of a load balancer, merged from the attribute APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listener {
    pub load_balancer_id: String,
    pub protocol: String,
    pub port: i64,
    pub backend_port: i64,
    pub status: String,
    pub health_check: String,
    pub scheduler: String,
    #[serde(default, rename = "VServerGroupId")]
    pub vserver_group_id: String,
    #[serde(default, rename = "VServerGroupName")]
    pub vserver_group_name: String,
    #[serde(skip)]
    identity: String,
}

impl Listener {
    pub fn new(load_balancer_id: &str, protocol: &str, port: i64) -> Self {
        Self {
            load_balancer_id: load_balancer_id.to_string(),
            protocol: protocol.to_string(),
            port,
            backend_port: 0,
            status: String::new(),
            health_check: String::new(),
            scheduler: String::new(),
            vserver_group_id: String::new(),
            vserver_group_name: String::new(),
            identity: format!("{protocol}:{port}"),
        }
    }

    /// Placeholder row for a listener whose attributes could not be read.
    pub fn unknown(load_balancer_id: &str, port: i64) -> Self {
        Self {
            status: "Unknown".to_string(),
            health_check: "Unknown".to_string(),
            scheduler: "Unknown".to_string(),
            ..Self::new(load_balancer_id, "Unknown", port)
        }
    }
}

impl ResourceRow for Listener {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn cells(&self) -> Vec<String> {
        let group = match (
            self.vserver_group_name.is_empty(),
            self.vserver_group_id.is_empty(),
        ) {
            (false, _) => self.vserver_group_name.clone(),
            (true, false) => self.vserver_group_id.clone(),
            (true, true) => "-".to_string(),
        };
        vec![
            self.protocol.clone(),
            self.port.to_string(),
            self.backend_port.to_string(),
            self.status.clone(),
            self.health_check.clone(),
            self.scheduler.clone(),
            group,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_listener_row() {
        let listener = Listener::unknown("lb-1", 8080);
        assert_eq!(
            listener.cells(),
            vec!["Unknown", "8080", "0", "Unknown", "Unknown", "Unknown", "-"]
        );
        assert_eq!(listener.identity(), "Unknown:8080");
    }
}
