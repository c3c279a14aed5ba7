// file: src/resolver/organization.rs
// description: cached address to organization resolution with private address labeling
// reference: memoized external lookups

use crate::resolver::address::is_private_address;
use crate::resolver::cache::ResolutionCache;
use crate::resolver::internal_label;
use crate::resolver::lookup::OrgLookup;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub external_lookups: usize,
    pub failed_lookups: usize,
    pub cache_hits: usize,
    pub private_addresses: usize,
}

/// Resolves addresses to organization names, caching every outcome for the
/// lifetime of the resolver.
///
/// A failed lookup is cached as an empty string and is not retried later in
/// the same run.
pub struct OrganizationResolver<L: OrgLookup> {
    lookup: L,
    cache: ResolutionCache,
    stats: ResolverStats,
}

impl<L: OrgLookup> OrganizationResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_cache(lookup, ResolutionCache::new())
    }

    pub fn with_cache(lookup: L, cache: ResolutionCache) -> Self {
        Self {
            lookup,
            cache,
            stats: ResolverStats::default(),
        }
    }

    /// Organization for `address`, or `""` when none could be determined.
    pub async fn resolve(&mut self, address: &str) -> String {
        if is_private_address(address) {
            if !self.cache.contains(address) {
                self.stats.private_addresses += 1;
            }
            return self
                .cache
                .insert_if_absent(address, internal_label(address))
                .to_string();
        }

        if let Some(cached) = self.cache.get(address) {
            self.stats.cache_hits += 1;
            return cached.to_string();
        }

        self.stats.external_lookups += 1;
        let organization = match self.lookup.lookup(address).await {
            Ok(org) => org,
            Err(e) => {
                debug!("{}", e);
                self.stats.failed_lookups += 1;
                String::new()
            }
        };

        self.cache
            .insert_if_absent(address, organization)
            .to_string()
    }

    /// Resolve the distinct, uncached, public addresses in `addresses` with up
    /// to `workers` lookups in flight. Each address is looked up at most once.
    pub async fn prefetch<'a, I>(&mut self, addresses: I, workers: usize)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let pending: Vec<&str> = addresses
            .into_iter()
            .filter(|address| !is_private_address(address) && !self.cache.contains(address))
            .filter(|address| seen.insert(*address))
            .collect();

        if pending.is_empty() {
            return;
        }

        info!(
            "Resolving {} distinct addresses with {} workers",
            pending.len(),
            workers.max(1)
        );

        let lookup = &self.lookup;
        let results = stream::iter(pending.into_iter().map(|address| async move {
            (address, lookup.lookup(address).await)
        }))
        .buffer_unordered(workers.max(1))
        .collect::<Vec<_>>()
        .await;

        for (address, result) in results {
            self.stats.external_lookups += 1;
            let organization = match result {
                Ok(org) => org,
                Err(e) => {
                    debug!("{}", e);
                    self.stats.failed_lookups += 1;
                    String::new()
                }
            };
            self.cache.insert_if_absent(address, organization);
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }
}
