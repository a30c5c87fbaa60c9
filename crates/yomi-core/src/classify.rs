//! Token composition classes.

use serde::Serialize;

use crate::unicode::{is_kana, is_kanji};

/// Script composition of a token's surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionClass {
    /// Kanji only, possibly with non-kana symbols (e.g. 漢字, 人々).
    PureKanji,
    /// At least one kanji and at least one hiragana/katakana (e.g. 食べる).
    Mixed,
    /// Kana without kanji (e.g. たべる, テレビ).
    PureKana,
    /// Neither kanji nor kana: punctuation, Latin, digits, symbols.
    Other,
}

/// Classify a surface form. Total: the empty string is `Other`.
pub fn classify(surface: &str) -> CompositionClass {
    let mut has_kanji = false;
    let mut has_kana = false;
    for c in surface.chars() {
        if is_kanji(c) {
            has_kanji = true;
        } else if is_kana(c) {
            has_kana = true;
        }
        if has_kanji && has_kana {
            return CompositionClass::Mixed;
        }
    }
    match (has_kanji, has_kana) {
        (true, _) => CompositionClass::PureKanji,
        (false, true) => CompositionClass::PureKana,
        (false, false) => CompositionClass::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic() {
        assert_eq!(classify("食べる"), CompositionClass::Mixed);
        assert_eq!(classify("食"), CompositionClass::PureKanji);
        assert_eq!(classify("たべる"), CompositionClass::PureKana);
        assert_eq!(classify("123"), CompositionClass::Other);
    }

    #[test]
    fn test_classify_katakana() {
        assert_eq!(classify("テレビ"), CompositionClass::PureKana);
        assert_eq!(classify("テレビ局"), CompositionClass::Mixed);
        assert_eq!(classify("ー"), CompositionClass::PureKana);
    }

    #[test]
    fn test_classify_symbols_do_not_count_as_kana() {
        // 々 is neither kanji nor kana, so 人々 stays a pure-kanji token.
        assert_eq!(classify("人々"), CompositionClass::PureKanji);
        assert_eq!(classify("。"), CompositionClass::Other);
        assert_eq!(classify("ABC"), CompositionClass::Other);
        assert_eq!(classify(""), CompositionClass::Other);
    }

    #[test]
    fn test_classify_mixed_order_independent() {
        assert_eq!(classify("お茶"), CompositionClass::Mixed);
        assert_eq!(classify("茶わん"), CompositionClass::Mixed);
        assert_eq!(classify("ご飯を"), CompositionClass::Mixed);
    }
}
