//! Morphological analysis: text → `(surface, reading?)` tokens.
//!
//! Conversion only depends on the [`Analyzer`] trait. [`LatticeAnalyzer`]
//! implements it by building a character lattice from surface-keyed
//! dictionary lookups and running N-best Viterbi over word costs.

pub(crate) mod cost;
mod lattice;
pub(crate) mod testutil;
mod viterbi;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::dict::{source, CompositeDictionary, DictError, Dictionary, SurfaceDictionary};
use crate::settings::AnalyzerSettings;

use cost::DefaultCostFunction;

pub use lattice::{build_lattice, Lattice, LatticeNode};
pub use viterbi::{PathSegment, ScoredPath};

/// One morpheme of analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    /// Reading as reported by the analyzer (normally katakana).
    pub reading: Option<String>,
}

impl Token {
    pub fn new(surface: impl Into<String>, reading: Option<&str>) -> Self {
        Self {
            surface: surface.into(),
            reading: reading.map(str::to_string),
        }
    }

    /// The reading, or the surface itself when the analyzer had none.
    pub fn reading_or_surface(&self) -> &str {
        self.reading.as_deref().unwrap_or(&self.surface)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictError),
    #[error("analysis failed: {0}")]
    Analysis(String),
}

pub trait Analyzer: Send + Sync {
    /// Split text into tokens whose surfaces concatenate back to `text`.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError>;
}

impl<T: Analyzer + ?Sized> Analyzer for &T {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        (**self).tokenize(text)
    }
}

impl<T: Analyzer + ?Sized> Analyzer for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        (**self).tokenize(text)
    }
}

impl<T: Analyzer + ?Sized> Analyzer for Arc<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        (**self).tokenize(text)
    }
}

/// Lattice/Viterbi analyzer over a surface-keyed lexicon.
pub struct LatticeAnalyzer {
    dict: Arc<dyn Dictionary>,
    settings: AnalyzerSettings,
}

impl LatticeAnalyzer {
    pub fn new(dict: Arc<dyn Dictionary>, settings: AnalyzerSettings) -> Self {
        Self { dict, settings }
    }

    /// Load a compiled system dictionary plus optional TSV user dictionaries.
    ///
    /// User entries are layered over the system dictionary; where both define
    /// the same surface and reading, the cheaper cost wins.
    pub fn open<P: AsRef<Path>>(
        system_dict: &Path,
        user_dicts: &[P],
        settings: AnalyzerSettings,
    ) -> Result<Self, AnalyzerError> {
        let system = SurfaceDictionary::open(system_dict)?;
        info!(
            path = %system_dict.display(),
            surfaces = system.stats().surfaces,
            "system dictionary opened"
        );
        if user_dicts.is_empty() {
            return Ok(Self::new(Arc::new(system), settings));
        }

        let mut layers: Vec<Arc<dyn Dictionary>> = vec![Arc::new(system)];
        for path in user_dicts {
            let path = path.as_ref();
            let user = source::load_tsv(path)?;
            info!(
                path = %path.display(),
                surfaces = user.stats().surfaces,
                "user dictionary loaded"
            );
            layers.push(Arc::new(user));
        }
        Ok(Self::new(
            Arc::new(CompositeDictionary::new(layers)),
            settings,
        ))
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dict.as_ref()
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn lattice(&self, text: &str) -> Lattice {
        build_lattice(self.dict.as_ref(), text, &self.settings)
    }

    /// Up to `n` distinct segmentations, best first.
    pub fn nbest_paths(&self, text: &str, n: usize) -> Vec<ScoredPath> {
        let lattice = self.lattice(text);
        viterbi::viterbi_nbest(&lattice, &DefaultCostFunction::new(&self.settings), n)
    }

    pub fn tokenize_nbest(&self, text: &str, n: usize) -> Vec<Vec<Token>> {
        self.nbest_paths(text, n)
            .into_iter()
            .map(ScoredPath::into_tokens)
            .collect()
    }
}

impl Analyzer for LatticeAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        let _span = debug_span!("tokenize", len = text.len()).entered();
        let tokens = self
            .tokenize_nbest(text, 1)
            .into_iter()
            .next()
            .unwrap_or_default();
        debug!(token_count = tokens.len());
        Ok(tokens)
    }
}
