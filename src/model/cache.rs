// SPDX-FileCopyrightText: 2026 Triton Authors
// SPDX-License-Identifier: MIT

//! Session-scoped query cache.
//!
//! Append-only for the lifetime of the process: no removal, no dedup, no
//! capacity bound. Growth is an accepted session-scoped constraint, not a
//! defect. The positional index doubles as the sidebar's 1-based display
//! ordinal and its stable selection key.

/// A stored prompt/raw-response pair enabling replay without a network call.
///
/// `json` is the raw, unparsed response text exactly as the generation call
/// returned it. Entries are never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedQuery {
    prompt: String,
    json: String,
}

impl CachedQuery {
    pub fn new(prompt: impl Into<String>, json: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), json: json.into() }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn json(&self) -> &str {
        &self.json
    }
}

/// In-memory, insertion-ordered list of cached queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCache {
    entries: Vec<CachedQuery>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Synchronous and infallible; insertion order is
    /// preserved.
    pub fn append(&mut self, query: CachedQuery) {
        self.entries.push(query);
    }

    pub fn entries(&self) -> &[CachedQuery] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CachedQuery> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CachedQuery, QueryCache};

    #[test]
    fn append_preserves_insertion_order() {
        let mut cache = QueryCache::new();
        cache.append(CachedQuery::new("first", "{}"));
        cache.append(CachedQuery::new("second", "{}"));
        cache.append(CachedQuery::new("third", "{}"));

        let prompts: Vec<&str> = cache.entries().iter().map(CachedQuery::prompt).collect();
        assert_eq!(prompts, vec!["first", "second", "third"]);
    }

    #[test]
    fn get_is_positional() {
        let mut cache = QueryCache::new();
        assert!(cache.get(0).is_none());

        cache.append(CachedQuery::new("p", r#"{"nodes":[],"edges":[]}"#));
        let entry = cache.get(0).expect("entry");
        assert_eq!(entry.prompt(), "p");
        assert_eq!(entry.json(), r#"{"nodes":[],"edges":[]}"#);
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn duplicate_prompts_are_kept() {
        let mut cache = QueryCache::new();
        cache.append(CachedQuery::new("same", "{}"));
        cache.append(CachedQuery::new("same", "{}"));
        assert_eq!(cache.len(), 2);
    }
}
