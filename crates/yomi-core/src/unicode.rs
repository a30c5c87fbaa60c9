//! Character-level Unicode classification for Japanese text.

use wana_kana::IsJapaneseStr;

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in analyzer readings,
/// so the simpler block-level check is preferred over an exact range.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー (U+30FC) and rarely-used symbols (゠ U+30A0, ヿ U+30FF).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK unified ideographs, compatibility ideographs and extension A.
///
/// Supplementary-plane ideographs (extension B and later) are not covered.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FCF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Whether `s` is romanized Japanese: Latin letters (macrons included),
/// digits, spaces and punctuation, with no kana or kanji. Empty is `false`.
pub fn is_romaji(s: &str) -> bool {
    !s.is_empty() && s.is_romaji()
}

pub fn has_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

pub fn has_hiragana(s: &str) -> bool {
    s.chars().any(is_hiragana)
}

pub fn has_katakana(s: &str) -> bool {
    s.chars().any(is_katakana)
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars().map(hiragana_char_to_katakana).collect()
}

fn hiragana_char_to_katakana(c: char) -> char {
    if ('\u{3041}'..='\u{3096}').contains(&c) || ('\u{309D}'..='\u{309E}').contains(&c) {
        char::from_u32(c as u32 + 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// Convert a katakana string to hiragana.
///
/// Only characters with a hiragana counterpart are shifted (ァ..ヶ, ヽ, ヾ).
/// ー, ・ and half-width katakana are passed through unchanged, so a reading
/// keeps its prolonged sound marks.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(fold_to_hiragana).collect()
}

/// Single-character form of [`katakana_to_hiragana`].
pub fn fold_to_hiragana(c: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&c) || ('\u{30FD}'..='\u{30FE}').contains(&c) {
        char::from_u32(c as u32 - 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// Check if a string is a valid kana reading.
///
/// Accepts hiragana and katakana, including the prolonged sound mark ー
/// which commonly appears in readings like "ラーメン".
pub fn is_kana_reading(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_kana)
}
