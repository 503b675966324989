//! Per-product adapters that turn paginated Aliyun APIs into whole lists.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use crate::aliyun::{self, ApiError, Credentials, Endpoint, OssClient, RpcClient};
use crate::config::Profile;
use crate::model::{Bucket, ObjectPage, Resource, into_resources};

pub mod dns;
pub mod ecs;
pub mod rds;
pub mod redis;
pub mod rocketmq;
pub mod slb;

/// Page size for every page-number paginated API.
pub const PAGE_SIZE: u32 = 100;

/// Drive a page-number paginated API until a short page or the reported
/// total ends the listing.
pub async fn collect_pages<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, u64), ApiError>>,
{
    let mut all = Vec::new();
    let mut page_number = 1;
    loop {
        let (items, total) = fetch_page(page_number).await?;
        let short_page = items.len() < page_size as usize;
        all.extend(items);
        if short_page || all.len() as u64 >= total {
            break;
        }
        page_number += 1;
    }
    Ok(all)
}

/// A single unit of data the navigation controller can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    EcsInstances,
    Domains,
    DomainRecords { domain: String },
    LoadBalancers,
    Listeners { load_balancer_id: String },
    Buckets,
    Objects {
        bucket: Bucket,
        marker: String,
        max_keys: u32,
    },
    DbInstances,
    Databases { instance_id: String },
    DbAccounts { instance_id: String },
    CacheInstances,
    CacheAccounts { instance_id: String },
    MqInstances,
    MqTopics { instance_id: String },
    MqGroups { instance_id: String },
}

impl FetchRequest {
    /// Spinner label while the request is in flight.
    pub fn describe(&self) -> String {
        match self {
            Self::EcsInstances => "Loading ECS instances...".to_string(),
            Self::Domains => "Loading DNS domains...".to_string(),
            Self::DomainRecords { domain } => format!("Loading records for {domain}..."),
            Self::LoadBalancers => "Loading SLB instances...".to_string(),
            Self::Listeners { load_balancer_id } => {
                format!("Loading listeners for {load_balancer_id}...")
            }
            Self::Buckets => "Loading OSS buckets...".to_string(),
            Self::Objects { bucket, .. } => format!("Loading objects in {}...", bucket.name),
            Self::DbInstances => "Loading RDS instances...".to_string(),
            Self::Databases { instance_id } => format!("Loading databases for {instance_id}..."),
            Self::DbAccounts { instance_id } | Self::CacheAccounts { instance_id } => {
                format!("Loading accounts for {instance_id}...")
            }
            Self::CacheInstances => "Loading Redis instances...".to_string(),
            Self::MqInstances => "Loading RocketMQ instances...".to_string(),
            Self::MqTopics { instance_id } => format!("Loading topics for {instance_id}..."),
            Self::MqGroups { instance_id } => format!("Loading groups for {instance_id}..."),
        }
    }
}

/// Result of a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    List(Vec<Resource>),
    Objects(ObjectPage),
}

/// The full set of product clients for one profile.
#[derive(Clone)]
pub struct Services {
    region: String,
    ecs: RpcClient,
    dns: RpcClient,
    slb: RpcClient,
    rds: RpcClient,
    redis: RpcClient,
    rocketmq: RpcClient,
    oss: OssClient,
}

impl Services {
    pub fn new(profile: &Profile) -> Result<Self, ApiError> {
        let http = aliyun::http_client()?;
        let credentials = Arc::new(Credentials::new(
            &profile.access_key_id,
            &profile.access_key_secret,
        ));
        let region = profile.region_id.as_str();
        let rpc = |host: String, version| {
            RpcClient::new(http.clone(), Endpoint::new(host, version), Arc::clone(&credentials))
        };

        let services = Self {
            region: region.to_string(),
            ecs: rpc(format!("ecs.{region}.aliyuncs.com"), ecs::VERSION),
            dns: rpc(format!("alidns.{region}.aliyuncs.com"), dns::VERSION),
            slb: rpc(format!("slb.{region}.aliyuncs.com"), slb::VERSION),
            rds: rpc("rds.aliyuncs.com".to_string(), rds::VERSION),
            redis: rpc("r-kvstore.aliyuncs.com".to_string(), redis::VERSION),
            rocketmq: rpc(format!("ons.{region}.aliyuncs.com"), rocketmq::VERSION),
            oss: OssClient::new(
                http.clone(),
                Arc::clone(&credentials),
                &profile.oss_endpoint,
                region,
            ),
        };
        info!(profile = %profile.name, region, "Created Aliyun clients");
        Ok(services)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub async fn fetch(&self, request: &FetchRequest) -> Result<Fetched, ApiError> {
        debug!(?request, "Fetching");
        let region = self.region.as_str();
        let list = match request {
            FetchRequest::EcsInstances => {
                into_resources(ecs::list_instances(&self.ecs, region).await?)
            }
            FetchRequest::Domains => into_resources(dns::list_domains(&self.dns).await?),
            FetchRequest::DomainRecords { domain } => {
                into_resources(dns::list_records(&self.dns, domain).await?)
            }
            FetchRequest::LoadBalancers => {
                into_resources(slb::list_load_balancers(&self.slb, region).await?)
            }
            FetchRequest::Listeners { load_balancer_id } => {
                into_resources(slb::list_listeners(&self.slb, region, load_balancer_id).await?)
            }
            FetchRequest::Buckets => into_resources(self.oss.list_buckets().await?),
            FetchRequest::Objects {
                bucket,
                marker,
                max_keys,
            } => {
                let page = self.oss.list_objects(bucket, marker, *max_keys).await?;
                return Ok(Fetched::Objects(page));
            }
            FetchRequest::DbInstances => {
                into_resources(rds::list_instances(&self.rds, region).await?)
            }
            FetchRequest::Databases { instance_id } => {
                into_resources(rds::list_databases(&self.rds, instance_id).await?)
            }
            FetchRequest::DbAccounts { instance_id } => {
                into_resources(rds::list_accounts(&self.rds, instance_id).await?)
            }
            FetchRequest::CacheInstances => {
                into_resources(redis::list_instances(&self.redis, region).await?)
            }
            FetchRequest::CacheAccounts { instance_id } => {
                into_resources(redis::list_accounts(&self.redis, instance_id).await?)
            }
            FetchRequest::MqInstances => {
                into_resources(rocketmq::list_instances(&self.rocketmq).await?)
            }
            FetchRequest::MqTopics { instance_id } => {
                into_resources(rocketmq::list_topics(&self.rocketmq, instance_id).await?)
            }
            FetchRequest::MqGroups { instance_id } => {
                into_resources(rocketmq::list_groups(&self.rocketmq, instance_id).await?)
            }
        };
        Ok(Fetched::List(list))
    }
}
