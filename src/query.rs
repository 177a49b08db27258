//! Listing query parameters
//!
//! Maps a [`LoaderConfig`] plus a page position onto the parameters of one
//! `cdn/stories` request. Optional settings only become keys when they carry
//! a value, so an absent setting is never sent as null or empty.

use crate::config::LoaderConfig;
use crate::types::JsonValue;
use serde_json::json;
use std::collections::BTreeMap;

/// Parameters of a single listing request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoriesQuery {
    params: BTreeMap<String, JsonValue>,
}

impl StoriesQuery {
    /// Build the query for `page` of a listing with `per_page` stories per page
    pub fn for_page(config: &LoaderConfig, page: u32, per_page: u32) -> Self {
        let mut query = Self::default();
        query.insert("version", json!(config.version.as_str()));
        query.insert("per_page", json!(per_page));
        query.insert("page", json!(page));

        query.insert_str("language", config.language.as_deref());
        query.insert_str("content_type", config.content_type.as_deref());
        query.insert_str("sort_by", config.sort_by.as_deref());

        if let Some(filters) = config.filter_query.as_ref().filter(|f| !f.is_empty()) {
            query.insert("filter_query", JsonValue::Object(filters.clone()));
        }
        if let Some(relations) = config.resolve_relations.as_ref().filter(|r| !r.is_empty()) {
            query.insert("resolve_relations", json!(relations));
        }
        if let Some(mode) = config.resolve_links {
            query.insert("resolve_links", json!(mode.as_str()));
        }

        query
    }

    fn insert(&mut self, key: &str, value: JsonValue) {
        self.params.insert(key.to_string(), value);
    }

    fn insert_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.insert(key, json!(value));
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.params.get(key)
    }

    /// Check if a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Parameter names, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Page number of this request
    pub fn page(&self) -> Option<u64> {
        self.params.get("page").and_then(JsonValue::as_u64)
    }

    /// Structured view of the parameters
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Flatten into query string pairs
    ///
    /// Nested objects become bracketed keys (`filter_query[field][in]`) and
    /// arrays are joined with commas.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            flatten_into(key.clone(), value, &mut pairs);
        }
        pairs
    }
}

fn flatten_into(key: String, value: &JsonValue, pairs: &mut Vec<(String, String)>) {
    match value {
        JsonValue::Null => {}
        JsonValue::Object(map) => {
            for (sub, nested) in map {
                flatten_into(format!("{key}[{sub}]"), nested, pairs);
            }
        }
        JsonValue::Array(items) => {
            let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(",");
            pairs.push((key, joined));
        }
        scalar => pairs.push((key, scalar_text(scalar))),
    }
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
