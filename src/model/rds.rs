use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbInstance {
    #[serde(rename = "DBInstanceId")]
    pub db_instance_id: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub engine_version: String,
    #[serde(default, rename = "DBInstanceClass")]
    pub db_instance_class: String,
    #[serde(default, rename = "DBInstanceStatus")]
    pub db_instance_status: String,
    #[serde(default, rename = "DBInstanceDescription")]
    pub db_instance_description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for DbInstance {
    fn identity(&self) -> &str {
        &self.db_instance_id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.db_instance_id.clone(),
            self.engine.clone(),
            self.engine_version.clone(),
            self.db_instance_class.clone(),
            self.db_instance_status.clone(),
            self.db_instance_description.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Database {
    #[serde(rename = "DBName")]
    pub db_name: String,
    #[serde(default, rename = "DBStatus")]
    pub db_status: String,
    #[serde(default)]
    pub character_set_name: String,
    #[serde(default, rename = "DBDescription")]
    pub db_description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for Database {
    fn identity(&self) -> &str {
        &self.db_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.db_name.clone(),
            self.db_status.clone(),
            self.character_set_name.clone(),
            self.db_description.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DbAccount {
    pub account_name: String,
    #[serde(default)]
    pub account_status: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub account_description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRow for DbAccount {
    fn identity(&self) -> &str {
        &self.account_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.account_name.clone(),
            self.account_status.clone(),
            self.account_type.clone(),
            self.account_description.clone(),
        ]
    }
}
