use crate::dict::{DictEntry, DictError, Dictionary, SurfaceDictionary};

fn sample_dict() -> SurfaceDictionary {
    SurfaceDictionary::from_entries(vec![
        (
            "東京".to_string(),
            vec![DictEntry::new("トウキョウ", 3000)],
        ),
        (
            "東京都".to_string(),
            vec![DictEntry::new("トウキョウト", 4000)],
        ),
        (
            "東".to_string(),
            vec![DictEntry::new("ヒガシ", 4000), DictEntry::new("トウ", 3800)],
        ),
        ("都".to_string(), vec![DictEntry::new("ト", 4500)]),
    ])
}

#[test]
fn test_lookup_sorted_by_cost() {
    let dict = sample_dict();
    let entries = dict.lookup("東");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].reading, "トウ");
    assert_eq!(entries[1].reading, "ヒガシ");
}

#[test]
fn test_lookup_missing() {
    let dict = sample_dict();
    assert!(dict.lookup("大阪").is_empty());
}

#[test]
fn test_common_prefix_search() {
    let dict = sample_dict();
    let results = dict.common_prefix_search("東京都に行く");
    let surfaces: Vec<&str> = results.iter().map(|r| r.surface.as_str()).collect();
    assert_eq!(surfaces, vec!["東", "東京", "東京都"]);
}

#[test]
fn test_common_prefix_search_no_match() {
    let dict = sample_dict();
    assert!(dict.common_prefix_search("に行く").is_empty());
    assert!(dict.common_prefix_search("").is_empty());
}

#[test]
fn test_empty_entries_dropped() {
    let dict = SurfaceDictionary::from_entries(vec![
        ("".to_string(), vec![DictEntry::new("ア", 1)]),
        ("空".to_string(), vec![]),
    ]);
    assert!(dict.is_empty());
}

#[test]
fn test_stats() {
    let stats = sample_dict().stats();
    assert_eq!(stats.surfaces, 4);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.max_surface_chars, 3);
}

#[test]
fn test_serialization_preserves_lookups() {
    let dict = sample_dict();
    let bytes = dict.to_bytes().unwrap();
    assert_eq!(&bytes[..4], b"YMDX");

    let restored = SurfaceDictionary::from_bytes(&bytes).unwrap();
    assert_eq!(restored.stats(), dict.stats());
    assert_eq!(restored.lookup("東"), dict.lookup("東"));
    assert_eq!(
        restored.common_prefix_search("東京都"),
        dict.common_prefix_search("東京都")
    );
}

#[test]
fn test_from_bytes_rejects_garbage() {
    assert!(matches!(
        SurfaceDictionary::from_bytes(b"YM"),
        Err(DictError::InvalidHeader)
    ));
    assert!(matches!(
        SurfaceDictionary::from_bytes(b"LXDX\x01\0\0\0\0"),
        Err(DictError::InvalidMagic)
    ));
    assert!(matches!(
        SurfaceDictionary::from_bytes(b"YMDX\x09\0\0\0\0"),
        Err(DictError::UnsupportedVersion(9))
    ));
    // Payload length points past the end of the buffer.
    assert!(matches!(
        SurfaceDictionary::from_bytes(b"YMDX\x01\xff\0\0\0"),
        Err(DictError::InvalidHeader)
    ));
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.dict");
    let dict = sample_dict();
    dict.save(&path).unwrap();

    let opened = SurfaceDictionary::open(&path).unwrap();
    assert_eq!(opened.lookup("東京"), dict.lookup("東京"));
    assert_eq!(opened.iter().count(), 4);
}

#[test]
fn test_open_missing_or_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.dict");
    assert!(matches!(
        SurfaceDictionary::open(&path),
        Err(DictError::Io(_))
    ));

    let bytes = sample_dict().to_bytes().unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();
    assert!(matches!(
        SurfaceDictionary::open(&path),
        Err(DictError::InvalidHeader)
    ));
}
