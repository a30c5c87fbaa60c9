use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DictEntry, DictError, Dictionary, SearchResult};

const MAGIC: &[u8; 4] = b"YMDX";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4; // magic + version + payload_len

/// In-memory lexicon keyed by surface form.
///
/// Prefix search tries each prefix of the query up to the longest stored
/// surface, so lookups stay bounded regardless of query length.
#[derive(Debug, Clone, Default)]
pub struct SurfaceDictionary {
    entries: BTreeMap<String, Vec<DictEntry>>,
    max_surface_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictStats {
    pub surfaces: usize,
    pub entries: usize,
    pub max_surface_chars: usize,
}

impl SurfaceDictionary {
    /// Build from `(surface, entries)` pairs. Repeated surfaces are merged
    /// and each surface's entries are sorted by cost.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<DictEntry>)>) -> Self {
        let mut map: BTreeMap<String, Vec<DictEntry>> = BTreeMap::new();
        for (surface, list) in entries {
            if surface.is_empty() {
                continue;
            }
            map.entry(surface).or_default().extend(list);
        }
        map.retain(|_, list| !list.is_empty());
        for list in map.values_mut() {
            list.sort_by_key(|e| e.cost);
        }
        Self::from_map(map)
    }

    fn from_map(entries: BTreeMap<String, Vec<DictEntry>>) -> Self {
        let max_surface_chars = entries
            .keys()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            entries,
            max_surface_chars,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DictEntry])> {
        self.entries
            .iter()
            .map(|(surface, list)| (surface.as_str(), list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> DictStats {
        DictStats {
            surfaces: self.entries.len(),
            entries: self.entries.values().map(Vec::len).sum(),
            max_surface_chars: self.max_surface_chars,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let payload = bincode::serialize(&self.entries).map_err(DictError::Serialize)?;
        let payload_len: u32 = payload
            .len()
            .try_into()
            .map_err(|_| DictError::Parse("dictionary payload exceeds u32::MAX".to_string()))?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < 5 {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&data[5..HEADER_SIZE]);
        let payload_len = u32::from_le_bytes(len_bytes) as usize;
        let payload = data
            .get(HEADER_SIZE..HEADER_SIZE + payload_len)
            .ok_or(DictError::InvalidHeader)?;

        let entries: BTreeMap<String, Vec<DictEntry>> =
            bincode::deserialize(payload).map_err(DictError::Deserialize)?;
        Ok(Self::from_map(entries))
    }

    /// Read and decode a compiled dictionary file.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let dict = Self::from_bytes(&fs::read(path)?)?;
        debug!(
            path = %path.display(),
            surfaces = dict.entries.len(),
            "dictionary loaded"
        );
        Ok(dict)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }
}

impl Dictionary for SurfaceDictionary {
    fn lookup(&self, surface: &str) -> Vec<DictEntry> {
        self.entries.get(surface).cloned().unwrap_or_default()
    }

    fn common_prefix_search(&self, text: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for (i, (offset, c)) in text.char_indices().enumerate() {
            if i >= self.max_surface_chars {
                break;
            }
            let prefix = &text[..offset + c.len_utf8()];
            if let Some(list) = self.entries.get(prefix) {
                results.push(SearchResult {
                    surface: prefix.to_string(),
                    entries: list.clone(),
                });
            }
        }
        results
    }
}
