// file: src/resolver/mod.rs
// description: address classification and organization resolution module exports
// reference: internal module structure

pub mod address;
pub mod cache;
pub mod ip_api;
pub mod lookup;
pub mod organization;

pub use address::is_private_address;
pub use cache::ResolutionCache;
pub use ip_api::IpApiClient;
pub use lookup::OrgLookup;
pub use organization::{OrganizationResolver, ResolverStats};

/// Prefix of the synthetic organization label given to private addresses.
pub const INTERNAL_LABEL_PREFIX: &str = "Internal User";

pub fn internal_label(address: &str) -> String {
    format!("{} ({})", INTERNAL_LABEL_PREFIX, address)
}
