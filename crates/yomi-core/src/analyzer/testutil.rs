#![cfg(test)]

use crate::dict::{DictEntry, SurfaceDictionary};
use crate::settings::AnalyzerSettings;

use super::{Analyzer, AnalyzerError, Token};

pub fn test_settings() -> AnalyzerSettings {
    AnalyzerSettings {
        segment_penalty: 1000,
        unknown_word_cost: 8000,
        max_unknown_run: 32,
        nbest: 5,
    }
}

pub fn test_dict() -> SurfaceDictionary {
    let entries = [
        ("私", "ワタシ", 3000),
        ("は", "ハ", 2000),
        ("漢字", "カンジ", 3000),
        ("漢", "カン", 5000),
        ("字", "ジ", 5000),
        ("を", "ヲ", 2000),
        ("食べる", "タベル", 3500),
        ("食べ", "タベ", 4000),
        ("食", "ショク", 5000),
        ("る", "ル", 4000),
        ("今日", "キョウ", 3000),
        ("今", "イマ", 4000),
        ("日", "ヒ", 4500),
        ("天気", "テンキ", 3500),
        ("いい", "イイ", 3000),
        ("です", "デス", 2000),
        ("東京", "トウキョウ", 3000),
        ("東京都", "トウキョウト", 4000),
        ("東", "ヒガシ", 4000),
        ("京", "キョウ", 5000),
        ("都", "ト", 4500),
        ("に", "ニ", 2000),
        ("行く", "イク", 3500),
        ("行", "ギョウ", 5000),
        ("お茶", "オチャ", 3000),
        ("飲む", "ノム", 3500),
        ("様々", "サマザマ", 3500),
        ("な", "ナ", 2000),
    ];
    SurfaceDictionary::from_entries(entries.into_iter().map(|(surface, reading, cost)| {
        (surface.to_string(), vec![DictEntry::new(reading, cost)])
    }))
}

/// Returns a fixed token sequence regardless of input.
pub struct FixedTokens(pub Vec<Token>);

impl FixedTokens {
    pub fn new(tokens: &[(&str, Option<&str>)]) -> Self {
        Self(
            tokens
                .iter()
                .map(|&(surface, reading)| Token::new(surface, reading))
                .collect(),
        )
    }
}

impl Analyzer for FixedTokens {
    fn tokenize(&self, _text: &str) -> Result<Vec<Token>, AnalyzerError> {
        Ok(self.0.clone())
    }
}

/// Fails the test if it is ever asked to tokenize.
pub struct UnreachableAnalyzer;

impl Analyzer for UnreachableAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        panic!("analyzer invoked with {text:?}");
    }
}

/// Always fails.
pub struct BrokenAnalyzer;

impl Analyzer for BrokenAnalyzer {
    fn tokenize(&self, _text: &str) -> Result<Vec<Token>, AnalyzerError> {
        Err(AnalyzerError::Analysis("backend unavailable".to_string()))
    }
}
