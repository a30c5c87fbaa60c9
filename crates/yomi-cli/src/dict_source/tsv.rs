use std::collections::HashMap;
use std::path::Path;

use yomi_core::dict::source::parse_tsv_line;
use yomi_core::dict::DictEntry;

use super::{parse_dict_files, DictSource, SourceError};

/// Tab-separated lexicon source.
///
/// File format: `surface<TAB>reading[<TAB>cost]`, `#` comments.
/// Readings may be hiragana or katakana and are stored as katakana.
/// Files matched: `*.tsv` in the input directory.
pub struct TsvSource;

impl DictSource for TsvSource {
    fn parse_dir(&self, dir: &Path) -> Result<HashMap<String, Vec<DictEntry>>, SourceError> {
        parse_dict_files(dir, "*.tsv", |name| name.ends_with(".tsv"), parse_tsv_line)
    }
}
