//! Wire types for the memory service search endpoint.

use std::collections::BTreeMap;

use copilot_types::memory::MemoryFilter;
use serde::Serialize;

/// Body of `POST {endpoint}/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub index: &'a str,
    pub query: &'a str,
    /// Alternative tag sets; a memory matches when it satisfies any of them.
    pub filters: Vec<&'a BTreeMap<String, Vec<String>>>,
    pub min_relevance: f64,
    /// -1 asks the service for every match.
    pub limit: i32,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, index: &'a str, filter: &'a MemoryFilter) -> Self {
        let filters = if filter.tags.is_empty() {
            Vec::new()
        } else {
            vec![&filter.tags]
        };

        Self {
            index,
            query,
            filters,
            min_relevance: filter.min_relevance,
            limit: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_types::memory::{CHAT_ID_TAG, MEMORY_TAG};

    #[test]
    fn test_request_json_shape() {
        let filter = MemoryFilter::new()
            .by_tag(CHAT_ID_TAG, "c1")
            .by_tag(MEMORY_TAG, "LongTermMemory");
        let request = SearchRequest::new("*", "copilotchat", &filter);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "index": "copilotchat",
                "query": "*",
                "filters": [{"chatid": ["c1"], "memory": ["LongTermMemory"]}],
                "minRelevance": 0.0,
                "limit": -1
            })
        );
    }

    #[test]
    fn test_no_tags_sends_no_filters() {
        let filter = MemoryFilter::new();
        let request = SearchRequest::new("*", "idx", &filter);
        assert!(request.filters.is_empty());
    }
}
