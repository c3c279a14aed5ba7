// file: src/resolver/cache.rs
// description: run-scoped memo table of address to organization resolutions

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Entries are write-once: the first resolution stored for an address is kept
/// for the rest of the run, including empty (unresolved) results.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    entries: HashMap<String, String>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: &str) -> Option<&str> {
        self.entries.get(address).map(String::as_str)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }

    /// Store `organization` unless the address already has an entry, and return
    /// whichever value is now cached.
    pub fn insert_if_absent(&mut self, address: &str, organization: String) -> &str {
        match self.entries.entry(address.to_string()) {
            Entry::Occupied(entry) => entry.into_mut().as_str(),
            Entry::Vacant(entry) => entry.insert(organization).as_str(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
