//! Typed resources returned by the service layer and shown by the views.

use serde::Serialize;

pub mod dns;
pub mod ecs;
pub mod oss;
pub mod rds;
pub mod redis;
pub mod rocketmq;
pub mod slb;

pub use dns::{Domain, DomainRecord};
pub use ecs::EcsInstance;
pub use oss::{Bucket, ObjectPage, ObjectSummary};
pub use rds::{Database, DbAccount, DbInstance};
pub use redis::{CacheAccount, CacheInstance};
pub use rocketmq::{MqGroup, MqInstance, MqTopic};
pub use slb::{Listener, LoadBalancer};

/// What every listed resource exposes to tables and clipboard lookups.
pub trait ResourceRow {
    /// Stable key identifying the resource within its list.
    fn identity(&self) -> &str;
    /// Table cells, in the order of [`ResourceKind::headers`].
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Ecs,
    Domain,
    Record,
    LoadBalancer,
    Listener,
    Bucket,
    Object,
    DbInstance,
    Database,
    DbAccount,
    CacheInstance,
    CacheAccount,
    MqInstance,
    MqTopic,
    MqGroup,
}

impl ResourceKind {
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Ecs => &[
                "Instance ID",
                "Status",
                "Zone",
                "CPU/RAM",
                "Private IP",
                "Public IP",
                "Name",
            ],
            Self::Domain => &["Domain Name", "Record Count", "Version Code"],
            Self::Record => &["Record ID", "RR", "Type", "Value", "TTL", "Status"],
            Self::LoadBalancer => &["SLB ID", "Name", "IP Address", "Type", "Status"],
            Self::Listener => &[
                "Protocol",
                "Port",
                "Backend Port",
                "Status",
                "Health Check",
                "Scheduler",
                "VServer Group",
            ],
            Self::Bucket => &["Bucket Name", "Location", "Creation Date", "Storage Class"],
            Self::Object => &[
                "Object Key",
                "Size (Bytes)",
                "Last Modified",
                "Storage Class",
                "ETag",
            ],
            Self::DbInstance => &[
                "Instance ID",
                "Engine",
                "Version",
                "Class",
                "Status",
                "Description",
            ],
            Self::Database => &["Database Name", "Status", "Character Set", "Description"],
            Self::DbAccount => &["Account Name", "Status", "Type", "Description"],
            Self::CacheInstance => &[
                "Instance ID",
                "Instance Name",
                "Type",
                "Version",
                "Status",
                "Region",
                "Capacity",
                "Connection Domain",
            ],
            Self::CacheAccount => &["Account Name", "Status", "Type"],
            Self::MqInstance => &[
                "Instance ID",
                "Instance Name",
                "Type",
                "Status",
                "Create Time",
            ],
            Self::MqTopic => &["Topic", "Message Type", "Create Time", "Remark"],
            Self::MqGroup => &[
                "Group ID",
                "Group Type",
                "Create Time",
                "Update Time",
                "Remark",
            ],
        }
    }

    /// Plural noun used in empty-table messages.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Ecs => "ECS instances",
            Self::Domain => "domains",
            Self::Record => "DNS records",
            Self::LoadBalancer => "SLB instances",
            Self::Listener => "listeners",
            Self::Bucket => "OSS buckets",
            Self::Object => "objects",
            Self::DbInstance => "RDS instances",
            Self::Database => "databases",
            Self::DbAccount => "accounts",
            Self::CacheInstance => "Redis instances",
            Self::CacheAccount => "Redis accounts",
            Self::MqInstance => "RocketMQ instances",
            Self::MqTopic => "topics",
            Self::MqGroup => "consumer groups",
        }
    }

    pub fn empty_message(self) -> String {
        format!("No {} found.", self.plural())
    }
}

/// Closed sum of every resource the browser can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Ecs(EcsInstance),
    Domain(Domain),
    Record(DomainRecord),
    LoadBalancer(LoadBalancer),
    Listener(Listener),
    Bucket(Bucket),
    Object(ObjectSummary),
    DbInstance(DbInstance),
    Database(Database),
    DbAccount(DbAccount),
    CacheInstance(CacheInstance),
    CacheAccount(CacheAccount),
    MqInstance(MqInstance),
    MqTopic(MqTopic),
    MqGroup(MqGroup),
}

macro_rules! resource_variants {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Resource {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl Resource {
            pub const fn kind(&self) -> ResourceKind {
                match self {
                    $(Self::$variant(_) => ResourceKind::$variant,)*
                }
            }

            fn row(&self) -> &dyn ResourceRow {
                match self {
                    $(Self::$variant(inner) => inner,)*
                }
            }
        }
    };
}

resource_variants!(
    Ecs(EcsInstance),
    Domain(Domain),
    Record(DomainRecord),
    LoadBalancer(LoadBalancer),
    Listener(Listener),
    Bucket(Bucket),
    Object(ObjectSummary),
    DbInstance(DbInstance),
    Database(Database),
    DbAccount(DbAccount),
    CacheInstance(CacheInstance),
    CacheAccount(CacheAccount),
    MqInstance(MqInstance),
    MqTopic(MqTopic),
    MqGroup(MqGroup),
);

impl Resource {
    pub fn identity(&self) -> &str {
        self.row().identity()
    }

    pub fn cells(&self) -> Vec<String> {
        self.row().cells()
    }

    /// Pretty JSON with two-space indentation, as copied and edited.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn detail_title(&self) -> String {
        let id = self.identity();
        match self {
            Self::Ecs(_) => format!("ECS Details: {id}"),
            Self::LoadBalancer(_) => format!("SLB Details: {id}"),
            Self::Object(_) => format!("Object Details: {id}"),
            Self::DbInstance(_) => format!("RDS Details: {id}"),
            Self::Database(_) => format!("Database Details: {id}"),
            Self::DbAccount(_) => format!("Account Details: {id}"),
            Self::CacheInstance(_) => format!("Redis Details: {id}"),
            Self::CacheAccount(_) => format!("Redis Account Details: {id}"),
            Self::MqInstance(_) => format!("RocketMQ Details: {id}"),
            _ => format!("Details: {id}"),
        }
    }
}

/// Wrap a typed list into resources.
pub fn into_resources<T: Into<Resource>>(items: Vec<T>) -> Vec<Resource> {
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Resource> {
        vec![
            EcsInstance::default().into(),
            Domain::default().into(),
            DomainRecord::default().into(),
            LoadBalancer::default().into(),
            Listener::new("lb", "HTTP", 80).into(),
            Bucket::default().into(),
            ObjectSummary::default().into(),
            DbInstance::default().into(),
            Database::default().into(),
            DbAccount::default().into(),
            CacheInstance::default().into(),
            CacheAccount::default().into(),
            MqInstance::default().into(),
            MqTopic::default().into(),
            MqGroup::default().into(),
        ]
    }

    #[test]
    fn test_cells_line_up_with_headers() {
        for resource in sample() {
            assert_eq!(
                resource.cells().len(),
                resource.kind().headers().len(),
                "{:?}",
                resource.kind()
            );
        }
    }

    #[test]
    fn test_pretty_json_is_untagged() {
        let object = Resource::Object(ObjectSummary {
            key: "logs/a.txt".into(),
            size: 12,
            ..ObjectSummary::default()
        });
        let json = object.to_pretty_json().unwrap();
        assert!(json.starts_with("{\n  \"Key\": \"logs/a.txt\""));
        assert!(!json.contains("Object"));
        assert_eq!(object.detail_title(), "Object Details: logs/a.txt");
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(ResourceKind::Ecs.empty_message(), "No ECS instances found.");
    }
}
