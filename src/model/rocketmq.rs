use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

/// Render an epoch-millisecond timestamp in local time, blank when unset.
pub fn format_millis(ms: i64) -> String {
    if ms <= 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MqInstance {
    pub instance_id: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub instance_type: i32,
    #[serde(default)]
    pub instance_status: i32,
    #[serde(default)]
    pub create_time: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MqInstance {
    pub const fn type_label(&self) -> &'static str {
        match self.instance_type {
            1 => "Standard",
            2 => "Platinum",
            _ => "Unknown",
        }
    }

    pub const fn status_label(&self) -> &'static str {
        match self.instance_status {
            0 => "Deploying",
            2 => "Arrears",
            5 => "Running",
            7 => "Upgrading",
            _ => "Unknown",
        }
    }
}

impl ResourceRow for MqInstance {
    fn identity(&self) -> &str {
        &self.instance_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            self.instance_name.clone(),
            self.type_label().to_string(),
            self.status_label().to_string(),
            format_millis(self.create_time),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MqTopic {
    pub topic: String,
    #[serde(default)]
    pub message_type: i32,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub remark: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MqTopic {
    pub const fn message_type_label(&self) -> &'static str {
        match self.message_type {
            0 => "Normal",
            1 => "Partition Ordered",
            2 => "Global Ordered",
            4 => "Transaction",
            5 => "Scheduled/Delayed",
            _ => "Unknown",
        }
    }
}

impl ResourceRow for MqTopic {
    fn identity(&self) -> &str {
        &self.topic
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.topic.clone(),
            self.message_type_label().to_string(),
            format_millis(self.create_time),
            self.remark.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MqGroup {
    pub group_id: String,
    #[serde(default)]
    pub group_type: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub remark: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for MqGroup {
    fn identity(&self) -> &str {
        &self.group_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.group_id.clone(),
            self.group_type.clone(),
            format_millis(self.create_time),
            format_millis(self.update_time),
            self.remark.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_labels() {
        let instance: MqInstance = serde_json::from_str(
            r#"{"InstanceId": "MQ_INST_1", "InstanceName": "orders",
                "InstanceType": 2, "InstanceStatus": 5, "CreateTime": 1700000000000}"#,
        )
        .unwrap();
        let cells = instance.cells();
        assert_eq!(cells[2], "Platinum");
        assert_eq!(cells[3], "Running");
        assert_eq!(cells[4].len(), "2023-11-14 22:13:20".len());
    }

    #[test]
    fn test_unknown_codes() {
        let topic = MqTopic {
            message_type: 3,
            ..MqTopic::default()
        };
        assert_eq!(topic.message_type_label(), "Unknown");
        let instance = MqInstance {
            instance_status: 1,
            ..MqInstance::default()
        };
        assert_eq!(instance.status_label(), "Unknown");
    }

    #[test]
    fn test_unset_time_is_blank() {
        assert_eq!(format_millis(0), "");
    }
}
