use serde::{Deserialize, Serialize};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bucket {
    #[serde(default)]
    pub name: String,
    /// Region endpoint prefix, e.g. `oss-cn-hangzhou`.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub creation_date: String,
    #[serde(default)]
    pub storage_class: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub extranet_endpoint: String,
    #[serde(default)]
    pub intranet_endpoint: String,
}

impl ResourceRow for Bucket {
    fn identity(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.location.clone(),
            self.creation_date.clone(),
            self.storage_class.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectSummary {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub storage_class: String,
    #[serde(default, rename = "ETag")]
    pub etag: String,
    #[serde(default)]
    pub r#type: String,
}

impl ResourceRow for ObjectSummary {
    fn identity(&self) -> &str {
        &self.key
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.key.clone(),
            self.size.to_string(),
            self.last_modified.clone(),
            self.storage_class.clone(),
            self.etag.trim_matches('"').to_string(),
        ]
    }
}

/// One page of a marker-paginated object listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    pub objects: Vec<ObjectSummary>,
    pub is_truncated: bool,
    pub next_marker: String,
}
