//! Japanese reading conversion: hiragana, katakana and romaji output, with
//! okurigana and furigana notation aligned to each kanji.
//!
//! The pipeline is analyzer → classify → align → render. The analyzer is a
//! trait seam; [`LatticeAnalyzer`] is the bundled dictionary-backed one.

pub mod align;
pub mod analyzer;
pub mod classify;
pub mod convert;
pub mod dict;
pub mod explain;
pub mod render;
pub mod settings;
pub mod translit;
pub mod unicode;

pub use align::{AlignError, AlignPolicy, Annotation, AnnotationKind};
pub use analyzer::{Analyzer, AnalyzerError, LatticeAnalyzer, Token};
pub use classify::CompositionClass;
pub use convert::{
    convert, convert_raw, ConfigError, ConvertError, ConvertOptions, Converter, FallbackPolicy,
    Mode, RawOptions,
};
pub use dict::{Dictionary, SurfaceDictionary};
pub use render::Notation;
pub use settings::{AnalyzerSettings, Settings};
pub use translit::{to_kana, Syllabary};
pub use unicode::{
    has_hiragana, has_kanji, has_katakana, is_hiragana, is_kanji, is_katakana, is_romaji,
};
