use std::collections::HashMap;
use std::sync::Arc;

use super::{DictEntry, Dictionary, SearchResult};

/// A dictionary that merges results from multiple layers.
///
/// Typically the compiled system lexicon followed by user lexicons.
/// Duplicate entries (same surface + reading) are deduplicated, keeping
/// the lowest cost across all layers.
pub struct CompositeDictionary {
    layers: Vec<Arc<dyn Dictionary>>,
}

impl CompositeDictionary {
    pub fn new(layers: Vec<Arc<dyn Dictionary>>) -> Self {
        Self { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Deduplicate entries by reading, keeping the lowest cost for each.
/// The result is sorted by cost, ties broken by reading.
pub fn dedup_entries(entries: Vec<DictEntry>) -> Vec<DictEntry> {
    let mut best: HashMap<String, DictEntry> = HashMap::new();
    for e in entries {
        best.entry(e.reading.clone())
            .and_modify(|existing| {
                if e.cost < existing.cost {
                    *existing = e.clone();
                }
            })
            .or_insert(e);
    }
    let mut result: Vec<DictEntry> = best.into_values().collect();
    result.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.reading.cmp(&b.reading)));
    result
}

/// Merge search results by surface, deduplicating entries within each surface.
fn merge_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut by_surface: HashMap<String, Vec<DictEntry>> = HashMap::new();
    for sr in results {
        by_surface.entry(sr.surface).or_default().extend(sr.entries);
    }
    let mut merged: Vec<SearchResult> = by_surface
        .into_iter()
        .map(|(surface, entries)| SearchResult {
            surface,
            entries: dedup_entries(entries),
        })
        .collect();
    merged.sort_by(|a, b| {
        a.surface
            .chars()
            .count()
            .cmp(&b.surface.chars().count())
            .then_with(|| a.surface.cmp(&b.surface))
    });
    merged
}

impl Dictionary for CompositeDictionary {
    fn lookup(&self, surface: &str) -> Vec<DictEntry> {
        let mut all = Vec::new();
        for layer in &self.layers {
            all.extend(layer.lookup(surface));
        }
        dedup_entries(all)
    }

    fn common_prefix_search(&self, text: &str) -> Vec<SearchResult> {
        let mut all = Vec::new();
        for layer in &self.layers {
            all.extend(layer.common_prefix_search(text));
        }
        merge_results(all)
    }
}
