//! Settings loaded from TOML.
//!
//! - `parse_settings_toml(content)` parses and validates a settings file
//! - `default_settings()` returns the embedded defaults (parsed once)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Settings are plain values: callers load them and hand them to
//! `LatticeAnalyzer::new` / `Converter::with_options` explicitly.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::convert::{ConvertOptions, RawOptions};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// The embedded default settings.
pub fn default_settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub analyzer: AnalyzerSettings,
    #[serde(default)]
    convert: RawOptions,
    /// `convert` after validation.
    #[serde(skip)]
    convert_parsed: ConvertOptions,
}

impl Settings {
    /// Validated conversion defaults from the `[convert]` table.
    pub fn convert_options(&self) -> &ConvertOptions {
        &self.convert_parsed
    }

    /// The `[convert]` table as written.
    pub fn raw_convert(&self) -> &RawOptions {
        &self.convert
    }
}

impl Default for Settings {
    fn default() -> Self {
        default_settings().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    pub segment_penalty: i64,
    pub unknown_word_cost: i16,
    pub max_unknown_run: usize,
    pub nbest: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        default_settings().analyzer.clone()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.convert_parsed =
        ConvertOptions::from_raw(&s.convert).map_err(|e| SettingsError::InvalidValue {
            field: e.field().to_string(),
            reason: e.to_string(),
        })?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
        };
    }
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_non_negative!(analyzer.segment_penalty);
    check_non_negative!(analyzer.unknown_word_cost);
    check_positive_usize!(analyzer.max_unknown_run);
    check_positive_usize!(analyzer.nbest);

    Ok(())
}
