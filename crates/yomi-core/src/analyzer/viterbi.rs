use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use super::cost::CostFunction;
use super::lattice::Lattice;
use super::Token;

/// One segment of a scored path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub surface: String,
    pub reading: Option<String>,
    pub word_cost: i64,
    pub unknown: bool,
}

/// A segmentation of the whole input with its total cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPath {
    pub segments: Vec<PathSegment>,
    pub cost: i64,
}

impl ScoredPath {
    pub fn into_tokens(self) -> Vec<Token> {
        self.segments
            .into_iter()
            .map(|s| Token {
                surface: s.surface,
                reading: s.reading,
            })
            .collect()
    }

    /// Segmentation + reading key for deduplication.
    fn key(&self) -> String {
        let mut key = String::new();
        for s in &self.segments {
            key.push_str(&s.surface);
            key.push('\x1f');
            key.push_str(s.reading.as_deref().unwrap_or(""));
            key.push('\x1e');
        }
        key
    }
}

/// A single entry in the top-K list for a node: (accumulated cost, previous node index, rank at
/// that node). `prev_rank` identifies which of the K paths at the previous node this entry
/// continues from.
#[derive(Clone, Copy)]
struct KEntry {
    cost: i64,
    prev_idx: Option<usize>,
    prev_rank: usize,
}

/// Run N-best Viterbi: keep top-K cost/backpointer pairs per node.
///
/// Returns up to `n` distinct paths sorted by cost (best first). Paths with
/// identical segmentation and readings are deduplicated.
pub(crate) fn viterbi_nbest(
    lattice: &Lattice,
    cost_fn: &dyn CostFunction,
    n: usize,
) -> Vec<ScoredPath> {
    let char_count = lattice.char_count;
    let _span = debug_span!("viterbi_nbest", n, char_count).entered();
    if char_count == 0 || n == 0 {
        return Vec::new();
    }

    let num_nodes = lattice.nodes.len();
    // top_k[node_idx] = sorted Vec of KEntry (ascending cost), max `n` entries
    let mut top_k: Vec<Vec<KEntry>> = vec![Vec::new(); num_nodes];

    for &idx in &lattice.nodes_by_start[0] {
        top_k[idx].push(KEntry {
            cost: cost_fn.word_cost(&lattice.nodes[idx]),
            prev_idx: None,
            prev_rank: 0,
        });
    }

    for pos in 1..char_count {
        for &next_idx in &lattice.nodes_by_start[pos] {
            let word = cost_fn.word_cost(&lattice.nodes[next_idx]);

            for &prev_idx in &lattice.nodes_by_end[pos] {
                for rank in 0..top_k[prev_idx].len() {
                    let total = top_k[prev_idx][rank].cost + word;
                    insert_top_k(
                        &mut top_k[next_idx],
                        n,
                        KEntry {
                            cost: total,
                            prev_idx: Some(prev_idx),
                            prev_rank: rank,
                        },
                    );
                }
            }
        }
    }

    // (total_cost, node_idx, rank)
    let mut eos_entries: Vec<(i64, usize, usize)> = Vec::new();
    for &node_idx in &lattice.nodes_by_end[char_count] {
        for (rank, entry) in top_k[node_idx].iter().enumerate() {
            eos_entries.push((entry.cost, node_idx, rank));
        }
    }
    eos_entries.sort_by_key(|&(cost, _, _)| cost);

    let mut results: Vec<ScoredPath> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for &(total_cost, end_idx, end_rank) in &eos_entries {
        if results.len() >= n {
            break;
        }
        let scored = ScoredPath {
            segments: backtrace_nbest(&top_k, end_idx, end_rank, lattice, cost_fn),
            cost: total_cost,
        };
        if seen.insert(scored.key()) {
            results.push(scored);
        }
    }

    debug!(
        result_count = results.len(),
        best_cost = results.first().map(|p| p.cost)
    );
    results
}

/// Insert a KEntry into a top-K list, maintaining ascending sort by cost and max size `k`.
fn insert_top_k(list: &mut Vec<KEntry>, k: usize, entry: KEntry) {
    let pos = list.partition_point(|e| e.cost <= entry.cost);
    if pos >= k {
        return;
    }
    list.insert(pos, entry);
    if list.len() > k {
        list.pop();
    }
}

/// Backtrace from a specific (node_idx, rank) to reconstruct a path.
fn backtrace_nbest(
    top_k: &[Vec<KEntry>],
    end_idx: usize,
    end_rank: usize,
    lattice: &Lattice,
    cost_fn: &dyn CostFunction,
) -> Vec<PathSegment> {
    let mut path_indices = Vec::new();
    let mut cur_idx = end_idx;
    let mut cur_rank = end_rank;

    loop {
        path_indices.push(cur_idx);
        let entry = &top_k[cur_idx][cur_rank];
        match entry.prev_idx {
            Some(prev) => {
                cur_rank = entry.prev_rank;
                cur_idx = prev;
            }
            None => break,
        }
    }
    path_indices.reverse();

    path_indices
        .iter()
        .map(|&idx| {
            let node = &lattice.nodes[idx];
            PathSegment {
                surface: node.surface.clone(),
                reading: node.reading.clone(),
                word_cost: cost_fn.word_cost(node),
                unknown: node.unknown,
            }
        })
        .collect()
}
