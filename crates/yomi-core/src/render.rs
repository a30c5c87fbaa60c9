//! Annotated output: okurigana and furigana (HTML ruby) notation.

use serde::Serialize;

use crate::align::Annotation;
use crate::translit::Syllabary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// `漢(かん)字(じ)`: reading in delimiters after each kanji piece.
    Okurigana,
    /// `<ruby>漢<rp>(</rp><rt>かん</rt><rp>)</rp></ruby>`
    Furigana,
}

/// Render annotations in the given notation.
///
/// Non-kanji pieces are always emitted as-is. Kanji readings are
/// transliterated to `target`. For romaji furigana the whole text goes inside
/// a single `<ruby>` element with unannotated text between the ruby groups.
pub fn render(
    annotations: &[Annotation],
    target: Syllabary,
    notation: Notation,
    delimiter_start: &str,
    delimiter_end: &str,
) -> String {
    let mut out = String::new();
    match (notation, target) {
        (Notation::Okurigana, _) => {
            for a in annotations {
                out.push_str(&a.base);
                if a.is_kanji() {
                    out.push_str(delimiter_start);
                    out.push_str(&target.transliterate(&a.reading));
                    out.push_str(delimiter_end);
                }
            }
        }
        (Notation::Furigana, Syllabary::Romaji) => {
            out.push_str("<ruby>");
            for a in annotations {
                out.push_str(&a.base);
                if a.is_kanji() {
                    push_ruby_text(
                        &mut out,
                        &target.transliterate(&a.reading),
                        delimiter_start,
                        delimiter_end,
                    );
                }
            }
            out.push_str("</ruby>");
        }
        (Notation::Furigana, _) => {
            for a in annotations {
                if a.is_kanji() {
                    out.push_str("<ruby>");
                    out.push_str(&a.base);
                    push_ruby_text(
                        &mut out,
                        &target.transliterate(&a.reading),
                        delimiter_start,
                        delimiter_end,
                    );
                    out.push_str("</ruby>");
                } else {
                    out.push_str(&a.base);
                }
            }
        }
    }
    out
}

fn push_ruby_text(out: &mut String, reading: &str, delimiter_start: &str, delimiter_end: &str) {
    out.push_str("<rp>");
    out.push_str(delimiter_start);
    out.push_str("</rp><rt>");
    out.push_str(reading);
    out.push_str("</rt><rp>");
    out.push_str(delimiter_end);
    out.push_str("</rp>");
}
