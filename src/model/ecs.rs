use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpAddressSet {
    #[serde(default)]
    pub ip_address: Vec<String>,
}

impl IpAddressSet {
    fn first(&self) -> Option<&str> {
        self.ip_address.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcAttributes {
    #[serde(default)]
    pub private_ip_address: IpAddressSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EcsInstance {
    pub instance_id: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub cpu: i64,
    /// Memory in MiB.
    #[serde(default)]
    pub memory: i64,
    #[serde(default)]
    pub vpc_attributes: VpcAttributes,
    #[serde(default)]
    pub inner_ip_address: IpAddressSet,
    #[serde(default)]
    pub public_ip_address: IpAddressSet,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EcsInstance {
    pub fn private_ip(&self) -> &str {
        self.vpc_attributes
            .private_ip_address
            .first()
            .or_else(|| self.inner_ip_address.first())
            .unwrap_or("N/A")
    }

    pub fn public_ip(&self) -> &str {
        self.public_ip_address.first().unwrap_or("N/A")
    }
}

impl ResourceRow for EcsInstance {
    fn identity(&self) -> &str {
        &self.instance_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            self.status.clone(),
            self.zone_id.clone(),
            format!("{}C/{}G", self.cpu, self.memory / 1024),
            self.private_ip().to_string(),
            self.public_ip().to_string(),
            self.instance_name.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let instance: EcsInstance = serde_json::from_str(
            r#"{
                "InstanceId": "i-abc", "InstanceName": "web-1", "Status": "Running",
                "ZoneId": "cn-hangzhou-h", "Cpu": 4, "Memory": 8192,
                "VpcAttributes": {"PrivateIpAddress": {"IpAddress": ["10.0.0.5"]}, "VpcId": "vpc-1"},
                "PublicIpAddress": {"IpAddress": []},
                "OSName": "Alibaba Cloud Linux"
            }"#,
        )
        .unwrap();

        assert_eq!(
            instance.cells(),
            vec!["i-abc", "Running", "cn-hangzhou-h", "4C/8G", "10.0.0.5", "N/A", "web-1"]
        );
        assert_eq!(instance.extra["OSName"], "Alibaba Cloud Linux");
        assert_eq!(instance.vpc_attributes.extra["VpcId"], "vpc-1");

        let json = serde_json::to_string(&instance).unwrap();
        assert!(json.contains("OSName"));
    }

    #[test]
    fn test_private_ip_falls_back_to_inner() {
        let instance = EcsInstance {
            inner_ip_address: IpAddressSet {
                ip_address: vec!["172.16.0.9".into()],
            },
            ..EcsInstance::default()
        };
        assert_eq!(instance.private_ip(), "172.16.0.9");
    }
}
