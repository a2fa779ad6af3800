// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded cache of parsed templates.
//!
//! Production workloads log through a small, stable set of distinct format
//! strings, so after warm-up every `parse` call is a read-path hit. The cache
//! is explicitly owned by whichever formatter holds it, never a process-wide
//! global, so tests can construct a fresh one and assert on its state.

use crate::template::Template;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Most entries the cache will hold before it resets.
pub const MAX_CACHE_ITEMS: usize = 1000;
/// Format strings longer than this are parsed fresh every time and never
/// stored.
pub const MAX_CACHED_TEMPLATE_LENGTH: usize = 1024;

/**
A bounded, thread-safe `format string -> Arc<Template>` mapping.

Reads run concurrently and tolerate racing with a reset: a lookup that loses
the race simply misses and re-parses, which is correct, just slower. Writes
take the exclusive guard only around the map mutation itself, never while
parsing or rendering.

When the entry count has reached [`MAX_CACHE_ITEMS`] at insert time, the
whole map is cleared before the new entry goes in. Overflowing the cap is not
the sunny-day scenario; wholesale clearing is O(1) bookkeeping that keeps a
pathological stream of one-off format strings from growing the map without
bound, at the cost of an occasional cold restart.
*/
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the parsed template for `format`, reusing a cached parse when
    /// one exists. Never fails.
    pub fn parse(&self, format: &str) -> Arc<Template> {
        if format.len() > MAX_CACHED_TEMPLATE_LENGTH {
            return Arc::new(Template::parse(format));
        }

        {
            let templates = self
                .templates
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = templates.get(format) {
                return hit.clone();
            }
        }

        let parsed = Arc::new(Template::parse(format));

        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if templates.len() >= MAX_CACHE_ITEMS {
            templates.clear();
        }
        // Two racing parsers of the same new string both land here; the
        // second insert replaces an equivalent value, which is fine.
        templates.insert(format.to_owned(), parsed.clone());
        parsed
    }

    /// Current number of cached entries.
    pub fn len(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_CACHE_ITEMS, MAX_CACHED_TEMPLATE_LENGTH, TemplateCache};
    use crate::property_map::PropertyMap;
    use crate::value::PropertyValue;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn repeated_parses_share_one_template() {
        let cache = TemplateCache::new();
        let first = cache.parse("hello {name}");
        let second = cache.parse("hello {name}");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_parse_renders_identically_each_time() {
        let cache = TemplateCache::new();
        let mut properties = PropertyMap::new();
        properties.insert("n", PropertyValue::destructure(&json!(9)));
        let a = cache.parse("n = {n}").render(&properties);
        let b = cache.parse("n = {n}").render(&properties);
        assert_eq!(a, "n = 9");
        assert_eq!(a, b);
    }

    #[test]
    fn reaching_the_cap_resets_to_one_entry() {
        let cache = TemplateCache::new();
        for i in 0..MAX_CACHE_ITEMS {
            cache.parse(&format!("template number {i}"));
        }
        assert_eq!(cache.len(), MAX_CACHE_ITEMS);

        cache.parse("the one that overflows");
        assert_eq!(cache.len(), 1);
        // The survivor is the entry that triggered the reset.
        let again = cache.parse("the one that overflows");
        assert_eq!(cache.len(), 1);
        assert_eq!(again.raw(), "the one that overflows");
    }

    #[test]
    fn oversized_templates_bypass_the_cache() {
        let cache = TemplateCache::new();
        let long = format!("{}{}", "x".repeat(MAX_CACHED_TEMPLATE_LENGTH), "{n}");
        let template = cache.parse(&long);
        assert_eq!(cache.len(), 0);

        let mut properties = PropertyMap::new();
        properties.insert("n", PropertyValue::destructure(&json!(1)));
        assert!(template.render(&properties).ends_with('1'));
    }

    #[test]
    fn boundary_length_is_still_cached() {
        let cache = TemplateCache::new();
        cache.parse(&"y".repeat(MAX_CACHED_TEMPLATE_LENGTH));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_parsing_stays_within_the_cap() {
        let cache = Arc::new(TemplateCache::new());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..400 {
                    // A mix of shared and worker-distinct strings.
                    cache.parse(&format!("shared {n}", n = i % 10));
                    cache.parse(&format!("worker {worker} message {i}"));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        assert!(cache.len() <= MAX_CACHE_ITEMS);
    }
}
