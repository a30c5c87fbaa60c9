//! Text lexicon formats.
//!
//! User lexicons are tab-separated: `surface<TAB>reading[<TAB>cost]`, with
//! `#` comments and blank lines ignored. Readings may be written in either
//! kana script and are stored as katakana.

use std::fs;
use std::path::Path;

use super::{DictEntry, DictError, SurfaceDictionary};
use crate::unicode::{hiragana_to_katakana, is_kana_reading};

/// Cost given to user entries that omit one. Low enough to beat typical
/// system entries for the same span.
pub const DEFAULT_USER_COST: i16 = 2000;

/// Parse one TSV line. `Ok(None)` for blank and comment lines.
pub fn parse_tsv_line(line: &str) -> Result<Option<(String, DictEntry)>, String> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(format!("expected 2 or 3 tab-separated fields, got {}", fields.len()));
    }
    let surface = fields[0].trim();
    let reading = fields[1].trim();
    if surface.is_empty() {
        return Err("empty surface".to_string());
    }
    if !is_kana_reading(reading) {
        return Err(format!("reading {reading:?} is not kana"));
    }
    let cost = match fields.get(2).map(|s| s.trim()) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<i16>()
            .map_err(|e| format!("invalid cost {raw:?}: {e}"))?,
        _ => DEFAULT_USER_COST,
    };
    Ok(Some((
        surface.to_string(),
        DictEntry::new(hiragana_to_katakana(reading), cost),
    )))
}

/// Parse a whole TSV lexicon. Errors carry the 1-based line number.
pub fn parse_tsv(content: &str) -> Result<SurfaceDictionary, DictError> {
    let mut pairs = Vec::new();
    for (i, line) in content.lines().enumerate() {
        match parse_tsv_line(line) {
            Ok(Some((surface, entry))) => pairs.push((surface, vec![entry])),
            Ok(None) => {}
            Err(msg) => return Err(DictError::Parse(format!("line {}: {msg}", i + 1))),
        }
    }
    Ok(SurfaceDictionary::from_entries(pairs))
}

pub fn load_tsv(path: &Path) -> Result<SurfaceDictionary, DictError> {
    let content = fs::read_to_string(path)?;
    parse_tsv(&content).map_err(|e| match e {
        DictError::Parse(msg) => DictError::Parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Extract `(surface, entry)` from an IPADIC-format CSV row.
///
/// Layout: `surface,left_id,right_id,cost,pos1..pos4,conj_type,conj_form,base,reading,pronunciation`.
/// Returns `None` for rows without a usable kana reading.
pub fn ipadic_fields(fields: &[&str]) -> Option<(String, DictEntry)> {
    let surface = fields.first()?.trim();
    let cost: i16 = fields.get(3)?.trim().parse().ok()?;
    let reading = fields.get(11)?.trim();
    if surface.is_empty() || !is_kana_reading(reading) {
        return None;
    }
    Some((
        surface.to_string(),
        DictEntry::new(hiragana_to_katakana(reading), cost),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dictionary;

    #[test]
    fn test_parse_tsv_line() {
        let (surface, entry) = parse_tsv_line("漢字\tかんじ\t3000").unwrap().unwrap();
        assert_eq!(surface, "漢字");
        assert_eq!(entry, DictEntry::new("カンジ", 3000));

        let (_, entry) = parse_tsv_line("東京\tトウキョウ").unwrap().unwrap();
        assert_eq!(entry.cost, DEFAULT_USER_COST);
    }

    #[test]
    fn test_parse_tsv_line_skips_comments_and_blanks() {
        assert!(parse_tsv_line("# comment").unwrap().is_none());
        assert!(parse_tsv_line("").unwrap().is_none());
        assert!(parse_tsv_line("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_tsv_line_rejects_bad_rows() {
        assert!(parse_tsv_line("漢字").is_err());
        assert!(parse_tsv_line("漢字\tkanji").is_err());
        assert!(parse_tsv_line("漢字\tかんじ\tcheap").is_err());
        assert!(parse_tsv_line("\tかんじ").is_err());
    }

    #[test]
    fn test_parse_tsv_reports_line_number() {
        let err = parse_tsv("# header\n漢字\tかんじ\n字\n").unwrap_err();
        match err {
            DictError::Parse(msg) => assert!(msg.starts_with("line 3:"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_tsv_merges_surfaces() {
        let dict = parse_tsv("今日\tきょう\t3000\n今日\tこんにち\t5000\n").unwrap();
        let entries = dict.lookup("今日");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].reading, "キョウ");
    }

    #[test]
    fn test_ipadic_fields() {
        let row = "食べる,31,31,6000,動詞,自立,*,*,一段,基本形,食べる,タベル,タベル";
        let fields: Vec<&str> = row.split(',').collect();
        let (surface, entry) = ipadic_fields(&fields).unwrap();
        assert_eq!(surface, "食べる");
        assert_eq!(entry, DictEntry::new("タベル", 6000));

        let no_reading = "ＡＢＣ,1,1,100,名詞,固有名詞,*,*,*,*,ＡＢＣ";
        let fields: Vec<&str> = no_reading.split(',').collect();
        assert!(ipadic_fields(&fields).is_none());
    }

    #[test]
    fn test_load_tsv_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.tsv");
        fs::write(&path, "鬼滅\tきめつ\t1000\n").unwrap();
        let dict = load_tsv(&path).unwrap();
        assert_eq!(dict.lookup("鬼滅"), vec![DictEntry::new("キメツ", 1000)]);
    }
}
