use std::collections::HashMap;
use std::path::Path;

use yomi_core::dict::source::ipadic_fields;
use yomi_core::dict::DictEntry;

use super::{parse_dict_files, DictSource, SourceError};

/// IPADIC CSV lexicon source.
///
/// File format: 13-column CSV (comma-separated), UTF-8.
/// Columns: surface(0), left_id(1), right_id(2), cost(3), ..., reading(11), ...
/// Rows whose reading is missing or not kana are skipped.
/// Files matched: `*.csv` in the input directory.
pub struct IpadicSource;

impl DictSource for IpadicSource {
    fn parse_dir(&self, dir: &Path) -> Result<HashMap<String, Vec<DictEntry>>, SourceError> {
        parse_dict_files(
            dir,
            "*.csv",
            |name| name.ends_with(".csv"),
            |line| {
                let fields: Vec<&str> = line.split(',').collect();
                Ok(ipadic_fields(&fields))
            },
        )
    }
}
