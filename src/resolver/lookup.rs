// file: src/resolver/lookup.rs
// description: seam for the external address to organization lookup service

use crate::error::Result;
use std::future::Future;

/// External collaborator that maps a public address to an organization name.
///
/// Implementations report every kind of failure as `Err`; the resolver decides
/// how failures are cached.
pub trait OrgLookup {
    fn lookup(&self, address: &str) -> impl Future<Output = Result<String>> + Send;
}
