use serde::Serialize;

use crate::align::{annotate_token, Annotation};
use crate::analyzer::{LatticeAnalyzer, LatticeNode, ScoredPath, Token};
use crate::classify::{classify, CompositionClass};
use crate::convert::{convert_tokens, ConvertOptions};

/// Full diagnostic result for a single input text.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub text: String,
    pub lattice_char_count: usize,
    pub lattice_nodes: Vec<ExplainNode>,
    pub paths: Vec<ExplainPath>,
    /// Tokens of the best path, with their alignment.
    pub tokens: Vec<ExplainToken>,
    pub output: Option<String>,
    pub error: Option<String>,
}

/// A lattice node for diagnostic display.
#[derive(Debug, Serialize)]
pub struct ExplainNode {
    pub start: usize,
    pub end: usize,
    pub surface: String,
    pub reading: Option<String>,
    pub cost: i16,
    pub unknown: bool,
}

impl From<&LatticeNode> for ExplainNode {
    fn from(n: &LatticeNode) -> Self {
        Self {
            start: n.start,
            end: n.end,
            surface: n.surface.clone(),
            reading: n.reading.clone(),
            cost: n.cost,
            unknown: n.unknown,
        }
    }
}

/// A complete path with per-segment costs.
#[derive(Debug, Serialize)]
pub struct ExplainPath {
    pub segments: Vec<ExplainSegment>,
    pub cost: i64,
}

impl ExplainPath {
    pub fn surface(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.surface.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[derive(Debug, Serialize)]
pub struct ExplainSegment {
    pub surface: String,
    pub reading: Option<String>,
    /// Dictionary cost, without the segment penalty.
    pub word_cost: i64,
    pub segment_penalty: i64,
    pub unknown: bool,
}

#[derive(Debug, Serialize)]
pub struct ExplainToken {
    pub surface: String,
    pub reading: String,
    pub class: CompositionClass,
    pub annotations: Vec<Annotation>,
    /// Set when the reading could not be aligned.
    pub error: Option<String>,
}

fn explain_path(path: &ScoredPath, segment_penalty: i64) -> ExplainPath {
    ExplainPath {
        segments: path
            .segments
            .iter()
            .map(|seg| ExplainSegment {
                surface: seg.surface.clone(),
                reading: seg.reading.clone(),
                word_cost: seg.word_cost - segment_penalty,
                segment_penalty,
                unknown: seg.unknown,
            })
            .collect(),
        cost: path.cost,
    }
}

fn explain_token(token: &Token, options: &ConvertOptions) -> ExplainToken {
    let reading = token.reading_or_surface().to_string();
    let aligned = annotate_token(&token.surface, &reading, options.align_policy);
    let (annotations, error) = match aligned {
        Ok(annotations) => (annotations, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };
    ExplainToken {
        surface: token.surface.clone(),
        class: classify(&token.surface),
        reading,
        annotations,
        error,
    }
}

/// Run analysis and conversion on `text`, capturing every intermediate step.
pub fn explain(
    analyzer: &LatticeAnalyzer,
    text: &str,
    n: usize,
    options: &ConvertOptions,
) -> ExplainResult {
    let segment_penalty = analyzer.settings().segment_penalty;
    let lattice = analyzer.lattice(text);
    let lattice_nodes = lattice.nodes.iter().map(ExplainNode::from).collect();

    let scored = analyzer.nbest_paths(text, n.max(1));
    let paths = scored
        .iter()
        .map(|p| explain_path(p, segment_penalty))
        .collect();

    let best: Vec<Token> = scored
        .into_iter()
        .next()
        .map(ScoredPath::into_tokens)
        .unwrap_or_default();
    let tokens = best.iter().map(|t| explain_token(t, options)).collect();
    let (output, error) = match convert_tokens(&best, options) {
        Ok(out) => (Some(out), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ExplainResult {
        text: text.to_string(),
        lattice_char_count: lattice.char_count,
        lattice_nodes,
        paths,
        tokens,
        output,
        error,
    }
}

fn pad(label: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let display_width = UnicodeWidthStr::width(label);
    if display_width < width {
        format!("{}{}", label, " ".repeat(width - display_width))
    } else {
        label.to_string()
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Lattice for \"{}\" ({} chars, {} nodes) ===\n",
        result.text,
        result.lattice_char_count,
        result.lattice_nodes.len(),
    ));

    for pos in 0..result.lattice_char_count {
        let nodes_at_pos: Vec<&ExplainNode> = result
            .lattice_nodes
            .iter()
            .filter(|n| n.start == pos)
            .collect();
        if nodes_at_pos.is_empty() {
            continue;
        }
        out.push_str(&format!("  Position {}:\n", pos));
        for n in &nodes_at_pos {
            out.push_str(&format!(
                "    [{},{}] {} {} cost={:<6}{}\n",
                n.start,
                n.end,
                pad(&n.surface, 12),
                pad(n.reading.as_deref().unwrap_or("-"), 12),
                n.cost,
                if n.unknown { " (unknown)" } else { "" },
            ));
        }
    }

    if result.paths.is_empty() {
        out.push_str("\nNo paths found.\n");
        return out;
    }

    out.push_str(&format!("\n=== Paths ({}) ===\n", result.paths.len()));
    for (i, path) in result.paths.iter().enumerate() {
        out.push_str(&format!(
            "\n  #{:<2} {}  (cost={})\n",
            i + 1,
            path.surface(),
            path.cost,
        ));
        for (j, seg) in path.segments.iter().enumerate() {
            let seg_label = match &seg.reading {
                Some(r) => format!("{}({})", seg.surface, r),
                None => seg.surface.clone(),
            };
            out.push_str(&format!(
                "    seg[{}]: {} word={:<6} penalty={}\n",
                j,
                pad(&seg_label, 20),
                seg.word_cost,
                seg.segment_penalty,
            ));
        }
    }

    out.push_str("\n=== Alignment ===\n");
    for token in &result.tokens {
        let detail = match &token.error {
            Some(err) => format!("error: {err}"),
            None => token
                .annotations
                .iter()
                .map(|a| {
                    if a.is_kanji() {
                        format!("{}[{}]", a.base, a.reading)
                    } else {
                        a.base.clone()
                    }
                })
                .collect::<String>(),
        };
        out.push_str(&format!(
            "  {} {:<10} {}\n",
            pad(&token.surface, 12),
            format!("{:?}", token.class),
            detail,
        ));
    }

    match (&result.output, &result.error) {
        (Some(output), _) => out.push_str(&format!("\n=== Output ===\n  {output}\n")),
        (None, Some(err)) => out.push_str(&format!("\n=== Output ===\n  error: {err}\n")),
        (None, None) => {}
    }

    out
}
