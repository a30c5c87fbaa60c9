use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::Dictionary;
use crate::settings::AnalyzerSettings;
use crate::unicode::{hiragana_to_katakana, is_kana, is_katakana, is_latin};

/// A node in the analysis lattice.
#[derive(Debug, Clone, Serialize)]
pub struct LatticeNode {
    /// Start position (char index, inclusive)
    pub start: usize,
    /// End position (char index, exclusive)
    pub end: usize,
    /// Surface substring of the input
    pub surface: String,
    /// Katakana reading, if known
    pub reading: Option<String>,
    /// Word cost (lower = more preferred)
    pub cost: i16,
    /// Synthesized by the unknown-word fallback
    pub unknown: bool,
}

/// The lattice: all candidate segmentations of the input text.
pub struct Lattice {
    /// The original input
    pub input: String,
    /// All nodes in the lattice
    pub nodes: Vec<LatticeNode>,
    /// nodes_by_end[i] = indices of nodes that end at position i
    pub nodes_by_end: Vec<Vec<usize>>,
    /// nodes_by_start[i] = indices of nodes that start at position i
    pub nodes_by_start: Vec<Vec<usize>>,
    /// Number of characters in input
    pub char_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunClass {
    Katakana,
    Latin,
    Digit,
    Space,
    Single,
}

fn run_class(c: char) -> RunClass {
    if is_katakana(c) {
        RunClass::Katakana
    } else if is_latin(c) || ('Ａ'..='Ｚ').contains(&c) || ('ａ'..='ｚ').contains(&c) {
        RunClass::Latin
    } else if c.is_ascii_digit() || ('０'..='９').contains(&c) {
        RunClass::Digit
    } else if c.is_whitespace() {
        RunClass::Space
    } else {
        RunClass::Single
    }
}

/// Length in chars of the unknown word starting at `chars[0]`: a maximal
/// run of the same groupable script, capped at `max_run`, else one char.
fn unknown_run_len(chars: &[char], max_run: usize) -> usize {
    let Some(&first) = chars.first() else {
        return 0;
    };
    let class = run_class(first);
    if class == RunClass::Single {
        return 1;
    }
    chars
        .iter()
        .take(max_run.max(1))
        .take_while(|&&c| run_class(c) == class)
        .count()
}

/// Build a lattice from text using dictionary prefix search.
///
/// Every position without a single-char dictionary match gets an
/// unknown-word node, so at least one path always spans the input.
pub fn build_lattice(dict: &dyn Dictionary, text: &str, settings: &AnalyzerSettings) -> Lattice {
    let chars: Vec<char> = text.chars().collect();
    let char_count = chars.len();
    let _span = debug_span!("build_lattice", char_count).entered();
    // Byte offset of each char position, plus the end of the string.
    let mut byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    byte_offsets.push(text.len());

    let mut nodes = Vec::new();
    let mut nodes_by_end: Vec<Vec<usize>> = vec![Vec::new(); char_count + 1];
    let mut nodes_by_start: Vec<Vec<usize>> = vec![Vec::new(); char_count];

    for start in 0..char_count {
        let mut has_single_char_match = false;

        let suffix = &text[byte_offsets[start]..];
        for result in dict.common_prefix_search(suffix) {
            let surface_chars = result.surface.chars().count();
            let end = start + surface_chars;
            for entry in result.entries {
                let idx = nodes.len();
                nodes.push(LatticeNode {
                    start,
                    end,
                    surface: result.surface.clone(),
                    reading: Some(entry.reading),
                    cost: entry.cost,
                    unknown: false,
                });
                nodes_by_end[end].push(idx);
                nodes_by_start[start].push(idx);
                if surface_chars == 1 {
                    has_single_char_match = true;
                }
            }
        }

        if !has_single_char_match {
            let len = unknown_run_len(&chars[start..], settings.max_unknown_run);
            let end = start + len;
            let surface = &text[byte_offsets[start]..byte_offsets[end]];
            let reading = surface
                .chars()
                .all(is_kana)
                .then(|| hiragana_to_katakana(surface));
            let idx = nodes.len();
            nodes.push(LatticeNode {
                start,
                end,
                surface: surface.to_string(),
                reading,
                cost: settings.unknown_word_cost,
                unknown: true,
            });
            nodes_by_end[end].push(idx);
            nodes_by_start[start].push(idx);
        }
    }

    debug!(node_count = nodes.len());
    Lattice {
        input: text.to_string(),
        nodes,
        nodes_by_end,
        nodes_by_start,
        char_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::testutil::{test_dict, test_settings};

    #[test]
    fn test_build_lattice_basic() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "今日は", &test_settings());
        assert_eq!(lattice.char_count, 3);

        let kyou: Vec<_> = lattice
            .nodes
            .iter()
            .filter(|n| n.surface == "今日")
            .collect();
        assert_eq!(kyou.len(), 1);
        assert_eq!(kyou[0].reading.as_deref(), Some("キョウ"));
        assert!(!kyou[0].unknown);
        assert!(lattice.nodes.iter().any(|n| n.surface == "今"));
    }

    #[test]
    fn test_unknown_kanji_has_no_reading() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "鬱", &test_settings());
        assert_eq!(lattice.nodes.len(), 1);
        let unknown = &lattice.nodes[0];
        assert!(unknown.unknown);
        assert_eq!(unknown.surface, "鬱");
        assert_eq!(unknown.reading, None);
        assert_eq!(unknown.cost, test_settings().unknown_word_cost);
    }

    #[test]
    fn test_unknown_hiragana_gets_katakana_reading() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "ぬ", &test_settings());
        assert_eq!(lattice.nodes[0].reading.as_deref(), Some("ヌ"));
    }

    #[test]
    fn test_unknown_runs_grouped_by_script() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "テレビabc123", &test_settings());
        let from_start: Vec<&str> = lattice.nodes_by_start[0]
            .iter()
            .map(|&i| lattice.nodes[i].surface.as_str())
            .collect();
        assert_eq!(from_start, vec!["テレビ"]);
        assert_eq!(
            lattice.nodes[lattice.nodes_by_start[0][0]].reading.as_deref(),
            Some("テレビ")
        );

        let latin = &lattice.nodes[lattice.nodes_by_start[3][0]];
        assert_eq!(latin.surface, "abc");
        assert_eq!(latin.reading, None);
        let digits = &lattice.nodes[lattice.nodes_by_start[6][0]];
        assert_eq!(digits.surface, "123");
    }

    #[test]
    fn test_unknown_run_capped() {
        let dict = test_dict();
        let settings = AnalyzerSettings {
            max_unknown_run: 2,
            ..test_settings()
        };
        let lattice = build_lattice(&dict, "アイウエ", &settings);
        let first = &lattice.nodes[lattice.nodes_by_start[0][0]];
        assert_eq!(first.surface, "アイ");
    }

    #[test]
    fn test_lattice_spans_input() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "今日はいい天気です", &test_settings());
        // Some node must start at 0 and some node must end at char_count.
        assert!(!lattice.nodes_by_start[0].is_empty());
        assert!(!lattice.nodes_by_end[lattice.char_count].is_empty());
        for pos in 0..lattice.char_count {
            assert!(
                !lattice.nodes_by_start[pos].is_empty(),
                "no nodes start at position {pos}"
            );
        }
    }

    #[test]
    fn test_nodes_by_start_end_consistency() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "東京都に行く", &test_settings());

        for (idx, node) in lattice.nodes.iter().enumerate() {
            assert!(
                lattice.nodes_by_start[node.start].contains(&idx),
                "node {idx} not in nodes_by_start[{}]",
                node.start
            );
            assert!(
                lattice.nodes_by_end[node.end].contains(&idx),
                "node {idx} not in nodes_by_end[{}]",
                node.end
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let dict = test_dict();
        let lattice = build_lattice(&dict, "", &test_settings());
        assert_eq!(lattice.char_count, 0);
        assert!(lattice.nodes.is_empty());
        assert_eq!(lattice.nodes_by_end.len(), 1);
    }
}
