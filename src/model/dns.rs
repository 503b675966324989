use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Domain {
    pub domain_name: String,
    #[serde(default)]
    pub domain_id: String,
    #[serde(default)]
    pub record_count: i64,
    #[serde(default)]
    pub version_code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for Domain {
    fn identity(&self) -> &str {
        &self.domain_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.domain_name.clone(),
            self.record_count.to_string(),
            self.version_code.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainRecord {
    pub record_id: String,
    #[serde(rename = "RR", default)]
    pub rr: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "TTL", default)]
    pub ttl: i64,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for DomainRecord {
    fn identity(&self) -> &str {
        &self.record_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.record_id.clone(),
            self.rr.clone(),
            self.r#type.clone(),
            self.value.clone(),
            self.ttl.to_string(),
            self.status.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_names() {
        let record: DomainRecord = serde_json::from_str(
            r#"{"RecordId": "9001", "RR": "www", "Type": "A", "Value": "1.2.3.4",
                "TTL": 600, "Status": "ENABLE", "Line": "default"}"#,
        )
        .unwrap();
        assert_eq!(
            record.cells(),
            vec!["9001", "www", "A", "1.2.3.4", "600", "ENABLE"]
        );
        assert_eq!(record.extra["Line"], "default");
    }
}
