use std::fs;

use yomi_core::settings::{default_toml, parse_settings_toml};

pub fn settings_export() {
    print!("{}", default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    let convert = s.convert_options();
    println!(
        "OK: analyzer.segment_penalty={}, analyzer.nbest={}, convert.to={}, convert.mode={}",
        s.analyzer.segment_penalty, s.analyzer.nbest, convert.to, convert.mode
    );
}
