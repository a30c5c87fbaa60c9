//! Reading alignment: distribute a token's aggregate reading over its kanji.
//!
//! A mixed surface such as 食べる is read as a pattern: every kanji is a
//! wildcard that captures some (possibly empty) run of the reading, and every
//! other character is a literal anchor that must match the reading exactly.
//! Anchors are compared after folding katakana to hiragana, so ビール瓶
//! aligns against both びーるびん and ビールビン.
//!
//! The matcher is a backtracking search over `(slot, position)` states,
//! driven by an explicit stack so token length never bounds recursion depth.
//! States known to fail are memoized, and a kanji never captures reading the
//! remaining anchors need.


use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classify::{classify, CompositionClass};
use crate::convert::ConfigError;
use crate::unicode::{fold_to_hiragana, is_kanji, katakana_to_hiragana};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Kanji,
    NonKanji,
}

/// A piece of a token's surface paired with its hiragana reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub base: String,
    pub kind: AnnotationKind,
    pub reading: String,
}

impl Annotation {
    pub fn kanji(base: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            kind: AnnotationKind::Kanji,
            reading: reading.into(),
        }
    }

    pub fn non_kanji(base: char, reading: char) -> Self {
        Self {
            base: base.to_string(),
            kind: AnnotationKind::NonKanji,
            reading: reading.to_string(),
        }
    }

    pub fn is_kanji(&self) -> bool {
        self.kind == AnnotationKind::Kanji
    }
}

/// How a kanji wildcard divides the reading when several splits are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignPolicy {
    /// Earlier kanji take as much of the reading as possible.
    #[default]
    Greedy,
    /// Earlier kanji take as little of the reading as possible.
    Lazy,
}

impl AlignPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            AlignPolicy::Greedy => "greedy",
            AlignPolicy::Lazy => "lazy",
        }
    }
}

impl fmt::Display for AlignPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(AlignPolicy::Greedy),
            "lazy" => Ok(AlignPolicy::Lazy),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// The reading does not fit the literal anchors of the surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot align reading {reading:?} with surface {surface:?}")]
pub struct AlignError {
    pub surface: String,
    pub reading: String,
}

/// Annotate a single token according to its composition class.
///
/// `reading` may be hiragana or katakana; annotation readings are hiragana.
pub fn annotate_token(
    surface: &str,
    reading: &str,
    policy: AlignPolicy,
) -> Result<Vec<Annotation>, AlignError> {
    match classify(surface) {
        CompositionClass::PureKanji => Ok(vec![Annotation::kanji(
            surface,
            katakana_to_hiragana(reading),
        )]),
        CompositionClass::Mixed => align(surface, reading, policy),
        CompositionClass::PureKana => Ok(surface
            .chars()
            .map(|c| Annotation::non_kanji(c, fold_to_hiragana(c)))
            .collect()),
        CompositionClass::Other => Ok(plain_annotations(surface)),
    }
}

/// Every character as an unannotated piece reading as itself.
pub fn plain_annotations(surface: &str) -> Vec<Annotation> {
    surface.chars().map(|c| Annotation::non_kanji(c, c)).collect()
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Kanji,
    Literal(char),
}

/// Align a mixed surface against its reading, one annotation per character.
pub fn align(
    surface: &str,
    reading: &str,
    policy: AlignPolicy,
) -> Result<Vec<Annotation>, AlignError> {
    let slots: Vec<Slot> = surface
        .chars()
        .map(|c| {
            if is_kanji(c) {
                Slot::Kanji
            } else {
                Slot::Literal(fold_to_hiragana(c))
            }
        })
        .collect();
    let hira: Vec<char> = katakana_to_hiragana(reading).chars().collect();

    let mut matcher = Matcher::new(&slots, &hira, policy);
    if !matcher.solve() {
        trace!(surface, reading, "alignment failed");
        return Err(AlignError {
            surface: surface.to_string(),
            reading: reading.to_string(),
        });
    }

    let mut annotations = Vec::with_capacity(slots.len());
    let mut start = 0;
    for ((c, slot), &end) in surface.chars().zip(&slots).zip(&matcher.ends) {
        annotations.push(match slot {
            Slot::Kanji => {
                Annotation::kanji(c.to_string(), hira[start..end].iter().collect::<String>())
            }
            Slot::Literal(h) => Annotation::non_kanji(c, *h),
        });
        start = end;
    }
    Ok(annotations)
}

struct Matcher<'a> {
    slots: &'a [Slot],
    reading: &'a [char],
    policy: AlignPolicy,
    /// `literals_from[i]`: literal slots in `slots[i..]`, the least reading
    /// the tail still needs.
    literals_from: Vec<usize>,
    /// `(slot, pos)` states with no match.
    dead: HashSet<(usize, usize)>,
    /// Reading position after each slot on the current path.
    ends: Vec<usize>,
}

/// One level of the search: `slot` starts at reading position `pos` and has
/// already tried `tried` candidate ends.
struct Frame {
    slot: usize,
    pos: usize,
    tried: usize,
}

impl<'a> Matcher<'a> {
    fn new(slots: &'a [Slot], reading: &'a [char], policy: AlignPolicy) -> Self {
        let mut literals_from = vec![0; slots.len() + 1];
        for (i, slot) in slots.iter().enumerate().rev() {
            literals_from[i] = literals_from[i + 1] + usize::from(matches!(slot, Slot::Literal(_)));
        }
        Self {
            slots,
            reading,
            policy,
            literals_from,
            dead: HashSet::new(),
            ends: vec![0; slots.len()],
        }
    }

    /// Depth-first search over an explicit frame stack. On success `ends`
    /// holds the matched path.
    fn solve(&mut self) -> bool {
        let mut stack = vec![Frame {
            slot: 0,
            pos: 0,
            tried: 0,
        }];
        while let Some(frame) = stack.last_mut() {
            let (slot, pos) = (frame.slot, frame.pos);
            if slot == self.slots.len() {
                if pos == self.reading.len() {
                    return true;
                }
                stack.pop();
                continue;
            }

            let candidate = self.candidate(slot, pos, frame.tried);
            frame.tried += 1;
            match candidate {
                Some(end) => {
                    if !self.dead.contains(&(slot + 1, end)) {
                        self.ends[slot] = end;
                        stack.push(Frame {
                            slot: slot + 1,
                            pos: end,
                            tried: 0,
                        });
                    }
                }
                None => {
                    self.dead.insert((slot, pos));
                    stack.pop();
                }
            }
        }
        false
    }

    /// The `tried`-th reading end for `slot` starting at `pos`, in policy order.
    fn candidate(&self, slot: usize, pos: usize, tried: usize) -> Option<usize> {
        let rest = self.reading.len() - pos;
        match self.slots[slot] {
            Slot::Literal(c) => (tried == 0
                && rest >= self.literals_from[slot]
                && self.reading[pos] == c)
                .then_some(pos + 1),
            Slot::Kanji => {
                let max = rest.checked_sub(self.literals_from[slot + 1])?;
                if tried > max {
                    return None;
                }
                let take = match self.policy {
                    AlignPolicy::Greedy => max - tried,
                    AlignPolicy::Lazy => tried,
                };
                Some(pos + take)
            }
        }
    }
}
