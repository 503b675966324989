use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheInstance {
    pub instance_id: String,
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub instance_type: String,
    #[serde(default)]
    pub engine_version: String,
    #[serde(default)]
    pub instance_status: String,
    #[serde(default)]
    pub region_id: String,
    /// Capacity in MB.
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub connection_domain: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for CacheInstance {
    fn identity(&self) -> &str {
        &self.instance_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.instance_id.clone(),
            self.instance_name.clone(),
            self.instance_type.clone(),
            self.engine_version.clone(),
            self.instance_status.clone(),
            self.region_id.clone(),
            format!("{} MB", self.capacity),
            self.connection_domain.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheAccount {
    pub account_name: String,
    #[serde(default)]
    pub account_status: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for CacheAccount {
    fn identity(&self) -> &str {
        &self.account_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.account_name.clone(),
            self.account_status.clone(),
            self.account_type.clone(),
        ]
    }
}
