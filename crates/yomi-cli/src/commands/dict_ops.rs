use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process;

use yomi_core::dict::{dedup_entries, DictEntry, Dictionary, SurfaceDictionary};

use crate::dict_source;

fn file_size_mb(path: &str) -> f64 {
    let bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    bytes as f64 / 1_048_576.0
}

fn open_dict(dict_file: &str) -> SurfaceDictionary {
    die!(
        SurfaceDictionary::open(Path::new(dict_file)),
        "Error opening dictionary {dict_file}: {}"
    )
}

fn save_dict(dict: &SurfaceDictionary, output_file: &str) {
    die!(
        dict.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );
    eprintln!("Wrote {output_file} ({:.1} MB)", file_size_mb(output_file));
}

pub fn compile(source_name: &str, input_dir: &str, output_file: &str) {
    let dict_source = dict_source::from_name(source_name).unwrap_or_else(|| {
        eprintln!(
            "Error: unknown source '{source_name}' (available: {})",
            dict_source::SOURCE_NAMES.join(", ")
        );
        process::exit(1);
    });

    let input_path = Path::new(input_dir);
    if !input_path.is_dir() {
        eprintln!("Error: {input_dir} is not a directory");
        process::exit(1);
    }

    eprintln!("Source: {source_name}");
    let entries = die!(
        dict_source.parse_dir(input_path),
        "Error parsing dictionary: {}"
    );

    let surface_count = entries.len();
    let entry_count: usize = entries.values().map(|v| v.len()).sum();
    eprintln!("Building lexicon from {surface_count} surfaces ({entry_count} entries)...");

    let dict = SurfaceDictionary::from_entries(
        entries
            .into_iter()
            .map(|(surface, list)| (surface, dedup_entries(list))),
    );
    save_dict(&dict, output_file);
}

pub fn info(dict_file: &str) {
    let dict = open_dict(dict_file);
    let stats = dict.stats();

    println!("Dictionary: {dict_file}");
    println!("File size:  {:.1} MB", file_size_mb(dict_file));
    println!("Surfaces:   {}", stats.surfaces);
    println!("Entries:    {}", stats.entries);
    println!("Longest:    {} chars", stats.max_surface_chars);

    let sample_keys = ["漢字", "日本", "東京", "食べる"];
    println!();
    println!("Sample lookups:");
    for key in &sample_keys {
        let entries = dict.lookup(key);
        if entries.is_empty() {
            println!("  {key} → (not found)");
        } else {
            let readings: Vec<&str> = entries.iter().take(5).map(|e| e.reading.as_str()).collect();
            println!("  {key} → {}", readings.join(", "));
        }
    }
}

fn print_entries(entries: &[DictEntry]) {
    for e in entries {
        println!("  {} \tcost={}", e.reading, e.cost);
    }
}

pub fn lookup(dict_file: &str, surface: &str) {
    let dict = open_dict(dict_file);
    let entries = dict.lookup(surface);
    if entries.is_empty() {
        println!("{surface}: not found");
    } else {
        println!("{surface}: {} entries", entries.len());
        print_entries(&entries);
    }
}

pub fn prefix(dict_file: &str, query: &str) {
    let dict = open_dict(dict_file);
    let results = dict.common_prefix_search(query);
    if results.is_empty() {
        println!("{query}: no prefix matches");
        return;
    }
    for result in &results {
        println!("{}: {} entries", result.surface, result.entries.len());
        print_entries(&result.entries);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub max_cost: Option<i16>,
    pub max_surface_len: Option<usize>,
}

impl MergeOptions {
    fn filters(&self) -> bool {
        self.max_cost.is_some() || self.max_surface_len.is_some()
    }
}

/// Union of two lexicons. A reading present in both keeps the lower cost.
pub fn merge_dicts(
    a: &SurfaceDictionary,
    b: &SurfaceDictionary,
    opts: &MergeOptions,
) -> SurfaceDictionary {
    let mut merged: BTreeMap<String, Vec<DictEntry>> = BTreeMap::new();
    for (surface, entries) in a.iter().chain(b.iter()) {
        merged
            .entry(surface.to_string())
            .or_default()
            .extend_from_slice(entries);
    }

    if let Some(max_len) = opts.max_surface_len {
        merged.retain(|surface, _| surface.chars().count() <= max_len);
    }
    if let Some(max_cost) = opts.max_cost {
        for entries in merged.values_mut() {
            entries.retain(|e| e.cost <= max_cost);
        }
    }

    SurfaceDictionary::from_entries(
        merged
            .into_iter()
            .map(|(surface, list)| (surface, dedup_entries(list))),
    )
}

pub fn merge(dict_a_file: &str, dict_b_file: &str, output_file: &str, opts: &MergeOptions) {
    eprintln!("Loading {dict_a_file}...");
    let dict_a = open_dict(dict_a_file);
    let a = dict_a.stats();
    eprintln!("  A: {} surfaces, {} entries", a.surfaces, a.entries);

    eprintln!("Loading {dict_b_file}...");
    let dict_b = open_dict(dict_b_file);
    let b = dict_b.stats();
    eprintln!("  B: {} surfaces, {} entries", b.surfaces, b.entries);

    eprintln!("Merging...");
    let merged = merge_dicts(&dict_a, &dict_b, opts);
    let stats = merged.stats();
    if opts.filters() {
        let unfiltered = merge_dicts(&dict_a, &dict_b, &MergeOptions::default()).stats();
        eprintln!(
            "Filtered: dropped {} surfaces, {} entries",
            unfiltered.surfaces - stats.surfaces,
            unfiltered.entries - stats.entries
        );
    }
    eprintln!(
        "Merged lexicon: {} surfaces ({} entries)",
        stats.surfaces, stats.entries
    );
    save_dict(&merged, output_file);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, &str, i16)]) -> SurfaceDictionary {
        SurfaceDictionary::from_entries(
            pairs
                .iter()
                .map(|(s, r, c)| (s.to_string(), vec![DictEntry::new(*r, *c)])),
        )
    }

    #[test]
    fn test_merge_keeps_cheaper_duplicate() {
        let a = dict(&[("漢字", "カンジ", 4000), ("東京", "トウキョウ", 3000)]);
        let b = dict(&[("漢字", "カンジ", 2500), ("漢字", "カンシ", 7000)]);

        let merged = merge_dicts(&a, &b, &MergeOptions::default());
        assert_eq!(
            merged.lookup("漢字"),
            vec![DictEntry::new("カンジ", 2500), DictEntry::new("カンシ", 7000)]
        );
        assert_eq!(merged.lookup("東京"), vec![DictEntry::new("トウキョウ", 3000)]);
        assert_eq!(merged.stats().entries, 3);
    }

    #[test]
    fn test_merge_filters() {
        let a = dict(&[("漢字", "カンジ", 4000), ("東京都庁", "トウキョウトチョウ", 3000)]);
        let b = dict(&[("字", "ジ", 9000)]);

        let opts = MergeOptions {
            max_cost: Some(5000),
            max_surface_len: Some(3),
        };
        let merged = merge_dicts(&a, &b, &opts);
        assert_eq!(merged.stats().surfaces, 1);
        assert!(merged.lookup("東京都庁").is_empty());
        assert!(merged.lookup("字").is_empty());
        assert_eq!(merged.lookup("漢字").len(), 1);
    }
}
