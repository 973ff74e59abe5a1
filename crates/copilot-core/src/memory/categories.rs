//! Allow-list of memory category names.

use std::collections::BTreeMap;

/// Memory categories a client may query, keyed by name.
///
/// Built once from the configured memory map and consulted read-only.
#[derive(Debug, Clone, Default)]
pub struct MemoryCategories {
    prompts: BTreeMap<String, String>,
}

impl MemoryCategories {
    pub fn new(memory_map: BTreeMap<String, String>) -> Self {
        Self { prompts: memory_map }
    }

    /// Whether `name` is a configured category. Matching is case-sensitive.
    pub fn contains(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }
}
