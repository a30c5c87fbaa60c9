use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use serde::Serialize;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use yomi_core::classify::{classify, CompositionClass};
use yomi_core::explain::{explain, format_text};
use yomi_core::settings::parse_settings_toml;
use yomi_core::{
    ConfigError, ConvertOptions, Converter, LatticeAnalyzer, RawOptions, Settings, Token,
};

/// Where the analyzer's lexicons and settings come from.
pub struct AnalyzerArgs<'a> {
    pub dict_file: &'a str,
    pub user_dicts: &'a [String],
    pub settings_file: Option<&'a str>,
}

fn load_settings(settings_file: Option<&str>) -> Settings {
    match settings_file {
        Some(file) => {
            let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
            let settings = die!(parse_settings_toml(&content), "Error in {file}: {}");
            info!(file, "settings loaded");
            settings
        }
        None => Settings::default(),
    }
}

fn open_analyzer(args: &AnalyzerArgs<'_>, settings: &Settings) -> LatticeAnalyzer {
    die!(
        LatticeAnalyzer::open(
            Path::new(args.dict_file),
            args.user_dicts,
            settings.analyzer.clone()
        ),
        "Error opening dictionary: {}"
    )
}

/// Command-line options layered over the `[convert]` table of the settings.
pub fn resolve_options(
    settings: &Settings,
    overlay: &RawOptions,
) -> Result<ConvertOptions, ConfigError> {
    ConvertOptions::from_raw(&settings.raw_convert().merged(overlay))
}

/// Convert `text`, or every line of stdin when `text` is `None`.
pub fn convert_cmd(args: &AnalyzerArgs<'_>, text: Option<&str>, overlay: &RawOptions) {
    let settings = load_settings(args.settings_file);
    let options = die!(resolve_options(&settings, overlay), "Error: {}");
    let converter = Converter::with_options(open_analyzer(args, &settings), options);

    match text {
        Some(text) => println!("{}", die!(converter.convert(text), "Error: {}")),
        None => {
            for line in io::stdin().lock().lines() {
                let line = die!(line, "Error reading stdin: {}");
                println!("{}", die!(converter.convert(&line), "Error: {}"));
            }
        }
    }
}

pub fn explain_cmd(
    args: &AnalyzerArgs<'_>,
    text: &str,
    n: usize,
    json: bool,
    overlay: &RawOptions,
) {
    let settings = load_settings(args.settings_file);
    let options = die!(resolve_options(&settings, overlay), "Error: {}");
    let analyzer = open_analyzer(args, &settings);
    let n = if n == 0 { settings.analyzer.nbest } else { n };

    let result = explain(&analyzer, text, n, &options);
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&result), "Error: {}")
        );
    } else {
        print!("{}", format_text(&result));
    }
}

#[derive(Debug, Serialize)]
struct TokenRow<'a> {
    surface: &'a str,
    reading: Option<&'a str>,
    class: CompositionClass,
}

fn token_rows(tokens: &[Token]) -> Vec<TokenRow<'_>> {
    tokens
        .iter()
        .map(|t| TokenRow {
            surface: &t.surface,
            reading: t.reading.as_deref(),
            class: classify(&t.surface),
        })
        .collect()
}

fn pad(label: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(label);
    format!("{label}{}", " ".repeat(width.saturating_sub(w)))
}

/// One line per token with the surface and reading columns aligned.
pub fn format_token_table(tokens: &[Token]) -> String {
    let rows = token_rows(tokens);
    let surface_width = rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.surface))
        .max()
        .unwrap_or(0);
    let reading_width = rows
        .iter()
        .map(|r| UnicodeWidthStr::width(r.reading.unwrap_or("-")))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in &rows {
        out.push_str(&format!(
            "{}  {}  {:?}\n",
            pad(row.surface, surface_width),
            pad(row.reading.unwrap_or("-"), reading_width),
            row.class,
        ));
    }
    out
}

pub fn tokenize_cmd(args: &AnalyzerArgs<'_>, text: &str, n: usize, json: bool) {
    let settings = load_settings(args.settings_file);
    let analyzer = open_analyzer(args, &settings);
    let paths = analyzer.tokenize_nbest(text, n.max(1));

    if json {
        let rows: Vec<Vec<TokenRow<'_>>> = paths.iter().map(|p| token_rows(p)).collect();
        println!("{}", die!(serde_json::to_string_pretty(&rows), "Error: {}"));
        return;
    }

    if paths.len() == 1 {
        print!("{}", format_token_table(&paths[0]));
        return;
    }
    for (i, path) in paths.iter().enumerate() {
        let segs: Vec<String> = path
            .iter()
            .map(|t| format!("{}({})", t.surface, t.reading.as_deref().unwrap_or("-")))
            .collect();
        println!("#{:>2}: {}", i + 1, segs.join(" | "));
    }
}
