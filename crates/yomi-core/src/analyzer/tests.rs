use std::fs;
use std::sync::Arc;

use super::testutil::{test_dict, test_settings};
use super::*;

fn analyzer() -> LatticeAnalyzer {
    LatticeAnalyzer::new(Arc::new(test_dict()), test_settings())
}

fn pairs(tokens: &[Token]) -> Vec<(&str, Option<&str>)> {
    tokens
        .iter()
        .map(|t| (t.surface.as_str(), t.reading.as_deref()))
        .collect()
}

#[test]
fn test_tokenize_sentence() {
    let tokens = analyzer().tokenize("私は漢字を食べる").unwrap();
    assert_eq!(
        pairs(&tokens),
        vec![
            ("私", Some("ワタシ")),
            ("は", Some("ハ")),
            ("漢字", Some("カンジ")),
            ("を", Some("ヲ")),
            ("食べる", Some("タベル")),
        ]
    );
}

#[test]
fn test_tokenize_unknown_words() {
    let tokens = analyzer().tokenize("テレビを見る").unwrap();
    assert_eq!(
        pairs(&tokens),
        vec![
            ("テレビ", Some("テレビ")),
            ("を", Some("ヲ")),
            ("見", None),
            ("る", Some("ル")),
        ]
    );
}

#[test]
fn test_tokenize_keeps_whitespace_and_punctuation() {
    let text = "今日は、いい天気です。 ok";
    let tokens = analyzer().tokenize(text).unwrap();
    let joined: String = tokens.iter().map(|t| t.surface.as_str()).collect();
    assert_eq!(joined, text);
    assert!(tokens.iter().any(|t| t.surface == "、"));
    assert!(tokens.iter().any(|t| t.surface == " "));
}

#[test]
fn test_tokenize_empty() {
    assert!(analyzer().tokenize("").unwrap().is_empty());
}

#[test]
fn test_tokenize_nbest_first_matches_tokenize() {
    let a = analyzer();
    let nbest = a.tokenize_nbest("今日はいい天気です", 3);
    assert!(!nbest.is_empty());
    assert!(nbest.len() <= 3);
    assert_eq!(nbest[0], a.tokenize("今日はいい天気です").unwrap());
}

#[test]
fn test_token_reading_or_surface() {
    assert_eq!(Token::new("見", None).reading_or_surface(), "見");
    assert_eq!(Token::new("今日", Some("キョウ")).reading_or_surface(), "キョウ");
}

#[test]
fn test_analyzer_through_smart_pointers() {
    let shared: Arc<dyn Analyzer> = Arc::new(analyzer());
    let boxed: Box<dyn Analyzer> = Box::new(analyzer());
    let expected = analyzer().tokenize("東京都に行く").unwrap();
    assert_eq!(shared.tokenize("東京都に行く").unwrap(), expected);
    assert_eq!(boxed.tokenize("東京都に行く").unwrap(), expected);
}

#[test]
fn test_open_with_user_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let system_path = dir.path().join("system.dict");
    test_dict().save(&system_path).unwrap();
    let user_path = dir.path().join("user.tsv");
    fs::write(&user_path, "# names\n見る\tみる\t1000\n").unwrap();

    let a = LatticeAnalyzer::open(&system_path, &[&user_path], test_settings()).unwrap();
    let tokens = a.tokenize("テレビを見る").unwrap();
    assert_eq!(tokens.last().unwrap().surface, "見る");
    assert_eq!(tokens.last().unwrap().reading.as_deref(), Some("ミル"));

    let system_only =
        LatticeAnalyzer::open::<&std::path::Path>(&system_path, &[], test_settings()).unwrap();
    assert!(system_only.dictionary().lookup("見る").is_empty());
}

#[test]
fn test_open_missing_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let result =
        LatticeAnalyzer::open::<&std::path::Path>(&dir.path().join("nope"), &[], test_settings());
    assert!(matches!(
        result,
        Err(AnalyzerError::Dictionary(DictError::Io(_)))
    ));
}

#[test]
fn test_open_reports_bad_user_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let system_path = dir.path().join("system.dict");
    test_dict().save(&system_path).unwrap();
    let user_path = dir.path().join("user.tsv");
    fs::write(&user_path, "見る\n").unwrap();

    let err = LatticeAnalyzer::open(&system_path, &[&user_path], test_settings())
        .err()
        .unwrap();
    assert!(err.to_string().contains("line 1"), "{err}");
}
