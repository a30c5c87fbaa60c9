use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::align::AlignPolicy;
use crate::render::Notation;
use crate::translit::Syllabary;

/// Invalid conversion options. Raised before any analysis happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown mode {0:?} (expected normal, spaced, okurigana or furigana)")]
    UnknownMode(String),
    #[error("unknown target syllabary {0:?} (expected hiragana, katakana or romaji)")]
    UnknownSyllabary(String),
    #[error("unknown alignment policy {0:?} (expected greedy or lazy)")]
    UnknownPolicy(String),
    #[error("unknown fallback {0:?} (expected fail or plain)")]
    UnknownFallback(String),
}

impl ConfigError {
    /// Settings key the rejected value came from.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::UnknownMode(_) => "convert.mode",
            ConfigError::UnknownSyllabary(_) => "convert.to",
            ConfigError::UnknownPolicy(_) => "convert.align_policy",
            ConfigError::UnknownFallback(_) => "convert.on_unalignable",
        }
    }
}

/// Output layout of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Readings concatenated.
    #[default]
    Normal,
    /// Readings joined by a single space.
    Spaced,
    /// Original text with each kanji reading inserted between delimiters.
    Okurigana,
    /// Original text with HTML ruby markup over each kanji run.
    Furigana,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Spaced => "spaced",
            Mode::Okurigana => "okurigana",
            Mode::Furigana => "furigana",
        }
    }

    /// The annotated notation this mode renders, if any.
    pub fn notation(self) -> Option<Notation> {
        match self {
            Mode::Okurigana => Some(Notation::Okurigana),
            Mode::Furigana => Some(Notation::Furigana),
            Mode::Normal | Mode::Spaced => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Mode::Normal),
            "spaced" => Ok(Mode::Spaced),
            "okurigana" => Ok(Mode::Okurigana),
            "furigana" => Ok(Mode::Furigana),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// What to do when a mixed token's reading cannot be aligned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Abort the conversion with [`super::ConvertError::Unalignable`].
    #[default]
    Fail,
    /// Emit the token's surface unannotated and keep going.
    Plain,
}

impl FallbackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackPolicy::Fail => "fail",
            FallbackPolicy::Plain => "plain",
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(FallbackPolicy::Fail),
            "plain" => Ok(FallbackPolicy::Plain),
            other => Err(ConfigError::UnknownFallback(other.to_string())),
        }
    }
}

/// Options as supplied by a caller or a settings file: every field optional,
/// values still unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    pub to: Option<String>,
    pub mode: Option<String>,
    pub delimiter_start: Option<String>,
    pub delimiter_end: Option<String>,
    pub align_policy: Option<String>,
    pub on_unalignable: Option<String>,
}

impl RawOptions {
    /// Layer `other` on top of `self`: fields set in `other` win.
    pub fn merged(&self, other: &RawOptions) -> RawOptions {
        fn pick(over: &Option<String>, base: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }
        RawOptions {
            to: pick(&other.to, &self.to),
            mode: pick(&other.mode, &self.mode),
            delimiter_start: pick(&other.delimiter_start, &self.delimiter_start),
            delimiter_end: pick(&other.delimiter_end, &self.delimiter_end),
            align_policy: pick(&other.align_policy, &self.align_policy),
            on_unalignable: pick(&other.on_unalignable, &self.on_unalignable),
        }
    }
}

impl From<&ConvertOptions> for RawOptions {
    fn from(opts: &ConvertOptions) -> Self {
        RawOptions {
            to: Some(opts.to.as_str().to_string()),
            mode: Some(opts.mode.as_str().to_string()),
            delimiter_start: Some(opts.delimiter_start.clone()),
            delimiter_end: Some(opts.delimiter_end.clone()),
            align_policy: Some(opts.align_policy.as_str().to_string()),
            on_unalignable: Some(opts.on_unalignable.as_str().to_string()),
        }
    }
}

/// Validated conversion options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertOptions {
    pub to: Syllabary,
    pub mode: Mode,
    pub delimiter_start: String,
    pub delimiter_end: String,
    pub align_policy: AlignPolicy,
    pub on_unalignable: FallbackPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            to: Syllabary::Hiragana,
            mode: Mode::Normal,
            delimiter_start: "(".to_string(),
            delimiter_end: ")".to_string(),
            align_policy: AlignPolicy::Greedy,
            on_unalignable: FallbackPolicy::Fail,
        }
    }
}

impl ConvertOptions {
    /// Parse raw options. Missing or empty values take their defaults.
    pub fn from_raw(raw: &RawOptions) -> Result<Self, ConfigError> {
        ConvertOptions::default().overlay(raw)
    }

    /// Apply the fields `raw` sets to a copy of `self`. Missing or empty
    /// values keep the current setting.
    pub fn overlay(&self, raw: &RawOptions) -> Result<Self, ConfigError> {
        fn given(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        let mut opts = self.clone();
        if let Some(to) = given(&raw.to) {
            opts.to = to.parse()?;
        }
        if let Some(mode) = given(&raw.mode) {
            opts.mode = mode.parse()?;
        }
        if let Some(start) = given(&raw.delimiter_start) {
            opts.delimiter_start = start.to_string();
        }
        if let Some(end) = given(&raw.delimiter_end) {
            opts.delimiter_end = end.to_string();
        }
        if let Some(policy) = given(&raw.align_policy) {
            opts.align_policy = policy.parse()?;
        }
        if let Some(fallback) = given(&raw.on_unalignable) {
            opts.on_unalignable = fallback.parse()?;
        }
        Ok(opts)
    }

    pub fn with_target(&self, to: Syllabary) -> Self {
        Self {
            to,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ConvertOptions::from_raw(&RawOptions::default()).unwrap();
        assert_eq!(opts, ConvertOptions::default());
        assert_eq!(opts.to, Syllabary::Hiragana);
        assert_eq!(opts.mode, Mode::Normal);
        assert_eq!(opts.delimiter_start, "(");
        assert_eq!(opts.delimiter_end, ")");
    }

    #[test]
    fn test_empty_strings_take_defaults() {
        let raw = RawOptions {
            to: Some(String::new()),
            mode: Some(String::new()),
            delimiter_start: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            ConvertOptions::from_raw(&raw).unwrap(),
            ConvertOptions::default()
        );
    }

    #[test]
    fn test_parse_all_fields() {
        let raw = RawOptions {
            to: Some("romaji".into()),
            mode: Some("okurigana".into()),
            delimiter_start: Some("[".into()),
            delimiter_end: Some("]".into()),
            align_policy: Some("lazy".into()),
            on_unalignable: Some("plain".into()),
        };
        let opts = ConvertOptions::from_raw(&raw).unwrap();
        assert_eq!(opts.to, Syllabary::Romaji);
        assert_eq!(opts.mode, Mode::Okurigana);
        assert_eq!(opts.delimiter_start, "[");
        assert_eq!(opts.delimiter_end, "]");
        assert_eq!(opts.align_policy, AlignPolicy::Lazy);
        assert_eq!(opts.on_unalignable, FallbackPolicy::Plain);
    }

    #[test]
    fn test_unknown_values_rejected() {
        let raw = RawOptions {
            mode: Some("bogus".into()),
            ..Default::default()
        };
        let err = ConvertOptions::from_raw(&raw).unwrap_err();
        assert_eq!(err, ConfigError::UnknownMode("bogus".into()));
        assert_eq!(err.field(), "convert.mode");

        let raw = RawOptions {
            to: Some("hangul".into()),
            ..Default::default()
        };
        assert!(matches!(
            ConvertOptions::from_raw(&raw),
            Err(ConfigError::UnknownSyllabary(_))
        ));

        let raw = RawOptions {
            on_unalignable: Some("skip".into()),
            ..Default::default()
        };
        assert!(matches!(
            ConvertOptions::from_raw(&raw),
            Err(ConfigError::UnknownFallback(_))
        ));
    }

    #[test]
    fn test_merged_prefers_overlay() {
        let base = RawOptions {
            to: Some("katakana".into()),
            mode: Some("spaced".into()),
            ..Default::default()
        };
        let overlay = RawOptions {
            mode: Some("furigana".into()),
            ..Default::default()
        };
        let merged = base.merged(&overlay);
        assert_eq!(merged.to.as_deref(), Some("katakana"));
        assert_eq!(merged.mode.as_deref(), Some("furigana"));
    }

    #[test]
    fn test_mode_notation() {
        assert_eq!(Mode::Normal.notation(), None);
        assert_eq!(Mode::Spaced.notation(), None);
        assert_eq!(Mode::Okurigana.notation(), Some(Notation::Okurigana));
        assert_eq!(Mode::Furigana.notation(), Some(Notation::Furigana));
    }

    #[test]
    fn test_with_target_keeps_other_fields() {
        let opts = ConvertOptions::default()
            .with_mode(Mode::Furigana)
            .with_target(Syllabary::Katakana);
        assert_eq!(opts.mode, Mode::Furigana);
        assert_eq!(opts.to, Syllabary::Katakana);
    }

    #[test]
    fn test_overlay_keeps_empty_delimiters() {
        let base = ConvertOptions {
            delimiter_start: String::new(),
            delimiter_end: String::new(),
            ..Default::default()
        };
        assert_eq!(base.overlay(&RawOptions::default()).unwrap(), base);

        let raw = RawOptions {
            delimiter_end: Some("]".into()),
            mode: Some(String::new()),
            ..Default::default()
        };
        let opts = base.overlay(&raw).unwrap();
        assert_eq!(opts.delimiter_start, "");
        assert_eq!(opts.delimiter_end, "]");
        assert_eq!(opts.mode, Mode::Normal);
    }

    #[test]
    fn test_raw_from_options_reparses() {
        let opts = ConvertOptions {
            to: Syllabary::Romaji,
            mode: Mode::Furigana,
            delimiter_start: "«".into(),
            delimiter_end: "»".into(),
            align_policy: AlignPolicy::Lazy,
            on_unalignable: FallbackPolicy::Plain,
        };
        assert_eq!(ConvertOptions::from_raw(&RawOptions::from(&opts)).unwrap(), opts);
    }
}
