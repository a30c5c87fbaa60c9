//! Syllabary transliteration on top of `wana_kana`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wana_kana::ConvertJapanese;

use crate::convert::ConfigError;

/// Target phonetic syllabary of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syllabary {
    #[default]
    Hiragana,
    Katakana,
    Romaji,
}

impl Syllabary {
    pub fn as_str(self) -> &'static str {
        match self {
            Syllabary::Hiragana => "hiragana",
            Syllabary::Katakana => "katakana",
            Syllabary::Romaji => "romaji",
        }
    }

    /// Transliterate a hiragana reading into this syllabary.
    ///
    /// Hiragana is a passthrough; the input is expected to be hiragana
    /// already (see [`crate::unicode::katakana_to_hiragana`]).
    pub fn transliterate(self, hiragana: &str) -> String {
        match self {
            Syllabary::Hiragana => hiragana.to_string(),
            Syllabary::Katakana => hiragana.to_katakana(),
            Syllabary::Romaji => hiragana.to_romaji(),
        }
    }
}

impl fmt::Display for Syllabary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Syllabary {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hiragana" => Ok(Syllabary::Hiragana),
            "katakana" => Ok(Syllabary::Katakana),
            "romaji" => Ok(Syllabary::Romaji),
            other => Err(ConfigError::UnknownSyllabary(other.to_string())),
        }
    }
}

/// Romanize a kana string (hiragana or katakana). Other characters pass through.
pub fn to_romaji(kana: &str) -> String {
    kana.to_romaji()
}

/// Convert romaji (or mixed romaji/kana) input to kana.
pub fn to_kana(romaji: &str) -> String {
    romaji.to_kana()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_targets() {
        assert_eq!(Syllabary::Hiragana.transliterate("た"), "た");
        assert_eq!(Syllabary::Katakana.transliterate("た"), "タ");
        assert_eq!(Syllabary::Romaji.transliterate("た"), "ta");
        assert_eq!(Syllabary::Romaji.transliterate("かんじ"), "kanji");
    }

    #[test]
    fn test_to_romaji_accepts_katakana() {
        assert_eq!(to_romaji("カンジ"), "kanji");
        assert_eq!(to_romaji("かんじ かな"), "kanji kana");
    }

    #[test]
    fn test_to_kana() {
        assert_eq!(to_kana("kanji"), "かんじ");
    }

    #[test]
    fn test_parse_syllabary() {
        assert_eq!("romaji".parse::<Syllabary>().unwrap(), Syllabary::Romaji);
        assert_eq!(Syllabary::default(), Syllabary::Hiragana);
        let err = "cyrillic".parse::<Syllabary>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSyllabary(ref s) if s == "cyrillic"));
    }

    #[test]
    fn test_display_round_trips() {
        for s in [Syllabary::Hiragana, Syllabary::Katakana, Syllabary::Romaji] {
            assert_eq!(s.to_string().parse::<Syllabary>().unwrap(), s);
        }
    }
}
