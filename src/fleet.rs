//! Fleet-wide resolution
//!
//! Each host is resolved on the blocking pool; hosts share nothing but the
//! engine, and one host failing leaves the others untouched.

use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{error, info};

use crate::inventory::types::HostContext;
use crate::version::engine::{Resolution, VersionEngine};
use crate::version::error::{HostError, ResolveError};

pub type FleetResults = IndexMap<String, Result<Resolution, HostError>>;

/// Resolve every host concurrently, keyed by host name in inventory order
pub async fn resolve_fleet(engine: Arc<VersionEngine>, hosts: Vec<HostContext>) -> FleetResults {
    let names: Vec<String> = hosts.iter().map(|h| h.name.clone()).collect();
    info!("Resolving versions for {} hosts", names.len());

    let tasks = hosts.into_iter().map(|host| {
        let engine = Arc::clone(&engine);
        tokio::task::spawn_blocking(move || engine.resolve_host(&host))
    });
    let joined = join_all(tasks).await;

    names
        .into_iter()
        .zip(joined)
        .map(|(name, result)| {
            let result = result.unwrap_or_else(|e| {
                error!("{}: resolution task failed: {}", name, e);
                Err(HostError::new(&name, ResolveError::Interrupted(e.to_string())))
            });
            (name, result)
        })
        .collect()
}

/// Number of hosts whose resolution failed
pub fn failure_count(results: &FleetResults) -> usize {
    results.values().filter(|r| r.is_err()).count()
}
