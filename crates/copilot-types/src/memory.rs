//! Semantic memory search model.
//!
//! Mirrors the wire shape of a Kernel-Memory style search service: a result
//! holds citations (matched documents), each split into text partitions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag carrying the chat session id on every stored memory.
pub const CHAT_ID_TAG: &str = "chatid";

/// Tag carrying the memory category name on every stored memory.
pub const MEMORY_TAG: &str = "memory";

/// Query text that matches every memory. Relevance is meaningless for it.
pub const WILDCARD_QUERY: &str = "*";

/// Tag filter and relevance threshold applied to a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryFilter {
    /// Required tag values. A memory matches when it carries every tag.
    pub tags: BTreeMap<String, Vec<String>>,
    /// Minimum relevance score; 0.0 returns everything the tags select.
    pub min_relevance: f64,
}

impl MemoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `tag` to carry `value`.
    pub fn by_tag(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.entry(tag.into()).or_default().push(value.into());
        self
    }

    pub fn with_min_relevance(mut self, min_relevance: f64) -> Self {
        self.min_relevance = min_relevance;
        self
    }
}

/// Response of a memory search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub no_result: bool,
    #[serde(default)]
    pub results: Vec<Citation>,
}

impl SearchResult {
    /// All partition texts across all citations, in returned order.
    pub fn partition_texts(&self) -> Vec<String> {
        self.results
            .iter()
            .flat_map(|citation| citation.partitions.iter())
            .map(|partition| partition.text.clone())
            .collect()
    }
}

/// A matched source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub source_content_type: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub partitions: Vec<Partition>,
}

/// A text fragment of a matched document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub text: String,
    #[serde(default)]
    pub relevance: f32,
    #[serde(default)]
    pub partition_number: i32,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(text: &str) -> Partition {
        Partition {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_builder() {
        let filter = MemoryFilter::new()
            .by_tag(CHAT_ID_TAG, "c1")
            .by_tag(MEMORY_TAG, "LongTermMemory")
            .with_min_relevance(0.0);
        assert_eq!(filter.tags[CHAT_ID_TAG], vec!["c1"]);
        assert_eq!(filter.tags[MEMORY_TAG], vec!["LongTermMemory"]);
        assert_eq!(filter.min_relevance, 0.0);
    }

    #[test]
    fn test_partition_texts_preserve_order() {
        let result = SearchResult {
            query: WILDCARD_QUERY.to_string(),
            no_result: false,
            results: vec![
                Citation {
                    partitions: vec![partition("a"), partition("b")],
                    ..Default::default()
                },
                Citation {
                    partitions: vec![partition("c")],
                    ..Default::default()
                },
            ],
        };
        assert_eq!(result.partition_texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_search_result_deserialize_camel_case() {
        let json = r#"{
            "query": "*",
            "noResult": false,
            "results": [{
                "documentId": "d1",
                "sourceName": "chat",
                "partitions": [{"text": "hello", "relevance": 0.4, "partitionNumber": 2,
                                "tags": {"chatid": ["c1"]}}]
            }]
        }"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.results[0].document_id, "d1");
        assert_eq!(result.results[0].partitions[0].partition_number, 2);
        assert_eq!(result.results[0].partitions[0].tags["chatid"], vec!["c1"]);
    }

    #[test]
    fn test_empty_search_result() {
        let result: SearchResult = serde_json::from_str(r#"{"noResult": true}"#).unwrap();
        assert!(result.no_result);
        assert!(result.partition_texts().is_empty());
    }
}
