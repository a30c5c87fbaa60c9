mod ipadic;
mod tsv;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use yomi_core::dict::DictEntry;

pub use ipadic::IpadicSource;
pub use tsv::TsvSource;

/// A pluggable lexicon source that parses raw files into entries.
pub trait DictSource {
    /// Parse all lexicon files in `dir` and return a map of surface → entries.
    fn parse_dir(&self, dir: &Path) -> Result<HashMap<String, Vec<DictEntry>>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Names accepted by [`from_name`].
pub const SOURCE_NAMES: &[&str] = &["tsv", "ipadic"];

/// List files in `dir` whose names satisfy `predicate`, sorted by name.
///
/// Returns an error if no matching files are found, using `label` in the
/// message (e.g. `"*.tsv"` or `"*.csv"`).
pub(super) fn list_dict_files(
    dir: &Path,
    label: &str,
    predicate: impl Fn(&str) -> bool,
) -> Result<Vec<fs::DirEntry>, SourceError> {
    let mut files: Vec<fs::DirEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            predicate(&name.to_string_lossy())
        })
        .collect();
    files.sort_by_key(|e| e.file_name());

    if files.is_empty() {
        return Err(SourceError::Parse(format!(
            "no {label} files found in {}",
            dir.display()
        )));
    }

    Ok(files)
}

fn read_utf8(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::InvalidData {
            SourceError::Parse(format!("{}: not valid UTF-8", path.display()))
        } else {
            SourceError::Io(e)
        }
    })
}

/// Parse lexicon files with shared boilerplate: file listing, line iteration,
/// blank-line skipping, and stats logging.
///
/// `parse_line` returns `Ok(Some(..))` to add an entry, `Ok(None)` to skip the
/// line, and `Err(msg)` to abort; the message is prefixed with file and line.
pub(super) fn parse_dict_files(
    dir: &Path,
    label: &str,
    predicate: impl Fn(&str) -> bool,
    parse_line: impl Fn(&str) -> Result<Option<(String, DictEntry)>, String>,
) -> Result<HashMap<String, Vec<DictEntry>>, SourceError> {
    let files = list_dict_files(dir, label, predicate)?;
    let mut entries: HashMap<String, Vec<DictEntry>> = HashMap::new();
    let mut total_lines = 0u64;
    let mut skipped = 0u64;

    for file_entry in &files {
        let path = file_entry.path();
        eprintln!("Reading {}...", path.display());
        let content = read_utf8(&path)?;

        for (i, line) in content.lines().enumerate() {
            total_lines += 1;
            if line.trim().is_empty() {
                skipped += 1;
                continue;
            }
            match parse_line(line) {
                Ok(Some((surface, entry))) => entries.entry(surface).or_default().push(entry),
                Ok(None) => skipped += 1,
                Err(msg) => {
                    return Err(SourceError::Parse(format!(
                        "{}:{}: {msg}",
                        path.display(),
                        i + 1
                    )))
                }
            }
        }
    }

    eprintln!("  (skipped {skipped} of {total_lines} lines)");
    Ok(entries)
}

/// Create a `DictSource` by name. Returns `None` for unknown source names.
pub fn from_name(name: &str) -> Option<Box<dyn DictSource>> {
    match name {
        "tsv" => Some(Box::new(TsvSource)),
        "ipadic" => Some(Box::new(IpadicSource)),
        _ => None,
    }
}
