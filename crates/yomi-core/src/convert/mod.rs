//! Conversion: analyzed tokens → text in the target syllabary and mode.

mod options;

pub use options::{ConfigError, ConvertOptions, FallbackPolicy, Mode, RawOptions};

use tracing::{debug, debug_span, warn};

use crate::align::{annotate_token, plain_annotations, AlignError, Annotation};
use crate::analyzer::{Analyzer, AnalyzerError, Token};
use crate::render::{render, Notation};
use crate::translit::{to_romaji, Syllabary};
use crate::unicode::{has_kanji, has_katakana, katakana_to_hiragana};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid options: {0}")]
    Config(#[from] ConfigError),
    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),
    #[error("cannot align reading {reading:?} with surface {surface:?}")]
    Unalignable { surface: String, reading: String },
}

impl From<AlignError> for ConvertError {
    fn from(e: AlignError) -> Self {
        ConvertError::Unalignable {
            surface: e.surface,
            reading: e.reading,
        }
    }
}

/// Parse `raw` and convert. Invalid options fail before the analyzer runs.
pub fn convert_raw(
    analyzer: &dyn Analyzer,
    text: &str,
    raw: &RawOptions,
) -> Result<String, ConvertError> {
    let options = ConvertOptions::from_raw(raw)?;
    convert(analyzer, text, &options)
}

pub fn convert(
    analyzer: &dyn Analyzer,
    text: &str,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let _span = debug_span!(
        "convert",
        to = options.to.as_str(),
        mode = options.mode.as_str()
    )
    .entered();
    let tokens = analyzer.tokenize(text)?;
    debug!(token_count = tokens.len());
    convert_tokens(&tokens, options)
}

/// Convert already-analyzed tokens.
pub fn convert_tokens(tokens: &[Token], options: &ConvertOptions) -> Result<String, ConvertError> {
    match options.mode.notation() {
        None => Ok(join_readings(tokens, options)),
        Some(notation) => {
            let annotations = annotate(tokens, options)?;
            Ok(render_notation(&annotations, options, notation))
        }
    }
}

/// Normal / spaced output.
fn join_readings(tokens: &[Token], options: &ConvertOptions) -> String {
    let separator = if options.mode == Mode::Spaced { " " } else { "" };
    match options.to {
        Syllabary::Hiragana => tokens
            .iter()
            .map(|t| {
                // Katakana words keep their script: テレビ stays テレビ.
                if has_kanji(&t.surface) && !has_katakana(&t.surface) {
                    katakana_to_hiragana(t.reading_or_surface())
                } else {
                    t.surface.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(separator),
        Syllabary::Katakana => join(tokens, separator),
        Syllabary::Romaji => to_romaji(&join(tokens, separator)),
    }
}

fn join(tokens: &[Token], separator: &str) -> String {
    tokens
        .iter()
        .map(Token::reading_or_surface)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Annotate every token in order, applying the unalignable-token policy.
pub fn annotate(
    tokens: &[Token],
    options: &ConvertOptions,
) -> Result<Vec<Annotation>, ConvertError> {
    let mut annotations = Vec::new();
    for token in tokens {
        let reading = token.reading_or_surface();
        match annotate_token(&token.surface, reading, options.align_policy) {
            Ok(pieces) => annotations.extend(pieces),
            Err(e) => match options.on_unalignable {
                FallbackPolicy::Fail => return Err(e.into()),
                FallbackPolicy::Plain => {
                    warn!(
                        surface = %e.surface,
                        reading = %e.reading,
                        "unalignable token emitted without reading"
                    );
                    annotations.extend(plain_annotations(&token.surface));
                }
            },
        }
    }
    Ok(annotations)
}

fn render_notation(
    annotations: &[Annotation],
    options: &ConvertOptions,
    notation: Notation,
) -> String {
    render(
        annotations,
        options.to,
        notation,
        &options.delimiter_start,
        &options.delimiter_end,
    )
}

/// A converter bound to one analyzer and a set of default options.
///
/// ```no_run
/// use std::sync::Arc;
/// use yomi_core::{Converter, LatticeAnalyzer, SurfaceDictionary};
///
/// let dict = SurfaceDictionary::open("system.dict".as_ref()).unwrap();
/// let analyzer = LatticeAnalyzer::new(Arc::new(dict), Default::default());
/// let converter = Converter::new(analyzer);
/// println!("{}", converter.to_romaji("漢字").unwrap());
/// ```
pub struct Converter<A> {
    analyzer: A,
    options: ConvertOptions,
}

impl<A: Analyzer> Converter<A> {
    pub fn new(analyzer: A) -> Self {
        Self::with_options(analyzer, ConvertOptions::default())
    }

    pub fn with_options(analyzer: A, options: ConvertOptions) -> Self {
        Self { analyzer, options }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert with the converter's default options.
    pub fn convert(&self, text: &str) -> Result<String, ConvertError> {
        convert(&self.analyzer, text, &self.options)
    }

    pub fn convert_with(
        &self,
        text: &str,
        options: &ConvertOptions,
    ) -> Result<String, ConvertError> {
        convert(&self.analyzer, text, options)
    }

    /// Convert with `raw` layered over the converter's default options.
    pub fn convert_raw(&self, text: &str, raw: &RawOptions) -> Result<String, ConvertError> {
        let options = self.options.overlay(raw)?;
        convert(&self.analyzer, text, &options)
    }

    pub fn to_hiragana(&self, text: &str) -> Result<String, ConvertError> {
        self.convert_with(text, &self.options.with_target(Syllabary::Hiragana))
    }

    pub fn to_katakana(&self, text: &str) -> Result<String, ConvertError> {
        self.convert_with(text, &self.options.with_target(Syllabary::Katakana))
    }

    pub fn to_romaji(&self, text: &str) -> Result<String, ConvertError> {
        self.convert_with(text, &self.options.with_target(Syllabary::Romaji))
    }
}
