use std::fmt;

use crate::config::ResourceAction;
use crate::model::ResourceKind;

/// Every screen the browser can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    MainMenu,
    EcsList,
    EcsDetail,
    DnsDomains,
    DnsRecords,
    SlbList,
    SlbDetail,
    SlbListeners,
    OssBuckets,
    OssObjects,
    OssObjectDetail,
    RdsList,
    RdsDetail,
    RdsDatabases,
    RdsAccounts,
    RdsDatabaseDetail,
    RdsAccountDetail,
    RedisList,
    RedisDetail,
    RedisAccounts,
    RedisAccountDetail,
    RocketMqList,
    RocketMqDetail,
    RocketMqTopics,
    RocketMqGroups,
}

impl PageId {
    pub const ALL: [Self; 25] = [
        Self::MainMenu,
        Self::EcsList,
        Self::EcsDetail,
        Self::DnsDomains,
        Self::DnsRecords,
        Self::SlbList,
        Self::SlbDetail,
        Self::SlbListeners,
        Self::OssBuckets,
        Self::OssObjects,
        Self::OssObjectDetail,
        Self::RdsList,
        Self::RdsDetail,
        Self::RdsDatabases,
        Self::RdsAccounts,
        Self::RdsDatabaseDetail,
        Self::RdsAccountDetail,
        Self::RedisList,
        Self::RedisDetail,
        Self::RedisAccounts,
        Self::RedisAccountDetail,
        Self::RocketMqList,
        Self::RocketMqDetail,
        Self::RocketMqTopics,
        Self::RocketMqGroups,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::MainMenu => "mainMenu",
            Self::EcsList => "ecsList",
            Self::EcsDetail => "ecsDetail",
            Self::DnsDomains => "dnsDomains",
            Self::DnsRecords => "dnsRecords",
            Self::SlbList => "slbList",
            Self::SlbDetail => "slbDetail",
            Self::SlbListeners => "slbListeners",
            Self::OssBuckets => "ossBuckets",
            Self::OssObjects => "ossObjects",
            Self::OssObjectDetail => "ossObjectDetail",
            Self::RdsList => "rdsList",
            Self::RdsDetail => "rdsDetail",
            Self::RdsDatabases => "rdsDatabases",
            Self::RdsAccounts => "rdsAccounts",
            Self::RdsDatabaseDetail => "rdsDatabaseDetail",
            Self::RdsAccountDetail => "rdsAccountDetail",
            Self::RedisList => "redisList",
            Self::RedisDetail => "redisDetail",
            Self::RedisAccounts => "redisAccounts",
            Self::RedisAccountDetail => "redisAccountDetail",
            Self::RocketMqList => "rocketmqList",
            Self::RocketMqDetail => "rocketmqDetail",
            Self::RocketMqTopics => "rocketmqTopics",
            Self::RocketMqGroups => "rocketmqGroups",
        }
    }

    /// Where `GoBack` leads. `None` only for the root.
    pub const fn parent(self) -> Option<Self> {
        Some(match self {
            Self::MainMenu => return None,
            Self::EcsList
            | Self::DnsDomains
            | Self::SlbList
            | Self::OssBuckets
            | Self::RdsList
            | Self::RedisList
            | Self::RocketMqList => Self::MainMenu,
            Self::EcsDetail => Self::EcsList,
            Self::DnsRecords => Self::DnsDomains,
            Self::SlbDetail | Self::SlbListeners => Self::SlbList,
            Self::OssObjects => Self::OssBuckets,
            Self::OssObjectDetail => Self::OssObjects,
            Self::RdsDetail | Self::RdsDatabases | Self::RdsAccounts => Self::RdsList,
            Self::RdsDatabaseDetail => Self::RdsDatabases,
            Self::RdsAccountDetail => Self::RdsAccounts,
            Self::RedisDetail | Self::RedisAccounts => Self::RedisList,
            Self::RedisAccountDetail => Self::RedisAccounts,
            Self::RocketMqDetail | Self::RocketMqTopics | Self::RocketMqGroups => {
                Self::RocketMqList
            }
        })
    }

    /// Page reached by pressing Enter on a row of this page.
    pub const fn drill_in(self) -> Option<Self> {
        match self {
            Self::EcsList => Some(Self::EcsDetail),
            Self::DnsDomains => Some(Self::DnsRecords),
            Self::SlbList => Some(Self::SlbDetail),
            Self::OssBuckets => Some(Self::OssObjects),
            Self::OssObjects => Some(Self::OssObjectDetail),
            Self::RdsList => Some(Self::RdsDetail),
            Self::RdsDatabases => Some(Self::RdsDatabaseDetail),
            Self::RdsAccounts => Some(Self::RdsAccountDetail),
            Self::RedisList => Some(Self::RedisDetail),
            Self::RedisAccounts => Some(Self::RedisAccountDetail),
            Self::RocketMqList => Some(Self::RocketMqDetail),
            _ => None,
        }
    }

    /// Sub-resource page opened by `action` on a row of this page.
    pub const fn sub_page(self, action: ResourceAction) -> Option<Self> {
        match (self, action) {
            (Self::RdsList, ResourceAction::Databases) => Some(Self::RdsDatabases),
            (Self::RdsList, ResourceAction::Accounts) => Some(Self::RdsAccounts),
            (Self::RedisList, ResourceAction::Accounts) => Some(Self::RedisAccounts),
            (Self::SlbList, ResourceAction::Listeners) => Some(Self::SlbListeners),
            (Self::RocketMqList, ResourceAction::Topics) => Some(Self::RocketMqTopics),
            (Self::RocketMqList, ResourceAction::Groups) => Some(Self::RocketMqGroups),
            _ => None,
        }
    }

    /// Top-level lists fetched once per session and cached.
    pub const fn is_cached_list(self) -> bool {
        matches!(
            self,
            Self::EcsList
                | Self::DnsDomains
                | Self::SlbList
                | Self::OssBuckets
                | Self::RdsList
                | Self::RedisList
                | Self::RocketMqList
        )
    }

    pub const fn is_detail(self) -> bool {
        matches!(
            self,
            Self::EcsDetail
                | Self::SlbDetail
                | Self::OssObjectDetail
                | Self::RdsDetail
                | Self::RdsDatabaseDetail
                | Self::RdsAccountDetail
                | Self::RedisDetail
                | Self::RedisAccountDetail
                | Self::RocketMqDetail
        )
    }

    /// Only the object listing is cursor-paginated.
    pub const fn is_paginated(self) -> bool {
        matches!(self, Self::OssObjects)
    }

    /// Resource shown by the rows of a list page.
    pub const fn row_kind(self) -> Option<ResourceKind> {
        Some(match self {
            Self::EcsList => ResourceKind::Ecs,
            Self::DnsDomains => ResourceKind::Domain,
            Self::DnsRecords => ResourceKind::Record,
            Self::SlbList => ResourceKind::LoadBalancer,
            Self::SlbListeners => ResourceKind::Listener,
            Self::OssBuckets => ResourceKind::Bucket,
            Self::OssObjects => ResourceKind::Object,
            Self::RdsList => ResourceKind::DbInstance,
            Self::RdsDatabases => ResourceKind::Database,
            Self::RdsAccounts => ResourceKind::DbAccount,
            Self::RedisList => ResourceKind::CacheInstance,
            Self::RedisAccounts => ResourceKind::CacheAccount,
            Self::RocketMqList => ResourceKind::MqInstance,
            Self::RocketMqTopics => ResourceKind::MqTopic,
            Self::RocketMqGroups => ResourceKind::MqGroup,
            _ => return None,
        })
    }

    /// Static key hints shown in the mode line.
    pub const fn help(self) -> &'static str {
        match self {
            Self::MainMenu => "j/k move | Enter open | 1-7 jump | O profile | ? help | Q quit",
            Self::EcsList | Self::DnsRecords | Self::RdsDatabases | Self::RdsAccounts
            | Self::RedisAccounts => {
                "Enter details | / search | n/N next/prev | yy copy | Esc/q back | Q quit"
            }
            Self::DnsDomains => "Enter records | / search | n/N next/prev | yy copy | Esc/q back | Q quit",
            Self::SlbList => {
                "Enter details | L listeners | / search | yy copy | Esc/q back | Q quit"
            }
            Self::SlbListeners | Self::RocketMqTopics | Self::RocketMqGroups => {
                "/ search | n/N next/prev | yy copy | Esc/q back | Q quit"
            }
            Self::OssBuckets => "Enter objects | / search | n/N next/prev | yy copy | Esc/q back | Q quit",
            Self::OssObjects => {
                "Enter details | ] next page | [ prev page | 0 first page | / search | yy copy | Esc/q back"
            }
            Self::RdsList => {
                "Enter details | D databases | A accounts | / search | yy copy | Esc/q back | Q quit"
            }
            Self::RedisList => {
                "Enter details | A accounts | / search | yy copy | Esc/q back | Q quit"
            }
            Self::RocketMqList => {
                "Enter details | T topics | G groups | / search | yy copy | Esc/q back | Q quit"
            }
            Self::EcsDetail
            | Self::SlbDetail
            | Self::OssObjectDetail
            | Self::RdsDetail
            | Self::RdsDatabaseDetail
            | Self::RdsAccountDetail
            | Self::RedisDetail
            | Self::RedisAccountDetail
            | Self::RocketMqDetail => {
                "Press 'Esc' or 'q' to go back, 'Q' to quit, 'yy' to copy JSON, 'e' to edit, '/' to search, 'n/N' for next/prev"
            }
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [ResourceAction; 7] = [
        ResourceAction::Copy,
        ResourceAction::Edit,
        ResourceAction::Databases,
        ResourceAction::Accounts,
        ResourceAction::Listeners,
        ResourceAction::Topics,
        ResourceAction::Groups,
    ];

    #[test]
    fn test_only_root_has_no_parent() {
        for page in PageId::ALL {
            assert_eq!(page.parent().is_none(), page == PageId::MainMenu, "{page}");
        }
    }

    #[test]
    fn test_forward_targets_return_to_their_source() {
        for page in PageId::ALL {
            if let Some(target) = page.drill_in() {
                assert_eq!(target.parent(), Some(page), "{page} -> {target}");
            }
            for action in ACTIONS {
                if let Some(target) = page.sub_page(action) {
                    assert_eq!(target.parent(), Some(page), "{page} -> {target}");
                }
            }
        }
    }

    #[test]
    fn test_every_page_reaches_root() {
        for page in PageId::ALL {
            let mut current = page;
            let mut steps = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                steps += 1;
                assert!(steps < 5, "cycle from {page}");
            }
            assert_eq!(current, PageId::MainMenu);
        }
    }

    #[test]
    fn test_tags_are_unique() {
        let mut tags: Vec<_> = PageId::ALL.iter().map(|p| p.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), PageId::ALL.len());
    }

    #[test]
    fn test_list_pages_know_their_rows() {
        for page in PageId::ALL {
            let is_list = page != PageId::MainMenu && !page.is_detail();
            assert_eq!(page.row_kind().is_some(), is_list, "{page}");
        }
    }
}
