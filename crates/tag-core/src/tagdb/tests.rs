use std::io::{Cursor, Write};

use super::*;

fn index_from(text: &str) -> (TagIndex, LoadStats) {
    TagIndex::from_reader(Cursor::new(text.as_bytes().to_vec())).unwrap()
}

fn order(index: &TagIndex) -> Vec<&str> {
    index.iter().map(|e| e.tag.as_str()).collect()
}

#[test]
fn sorted_by_weight_then_case_insensitive_name() {
    let (index, _) = index_from("beta,0,10\nAlpha,0,10\nzeta,0,500\ngamma,0,1\n");
    assert_eq!(order(&index), vec!["zeta", "Alpha", "beta", "gamma"]);
}

#[test]
fn short_rows_are_skipped() {
    let (index, stats) = index_from("safe,0,2204259\nbroken,0\n\nsolo,0,100\n");
    assert_eq!(order(&index), vec!["safe", "solo"]);
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.skipped_rows, 2);
}

#[test]
fn non_numeric_weight_defaults_to_zero() {
    let (index, stats) = index_from("odd,0,many\n");
    assert_eq!(index.weight("odd"), 0);
    assert_eq!(stats.malformed_weights, 1);
}

#[test]
fn alternates_get_half_weight() {
    let (index, stats) = index_from("rainbow_dash,4,1001,\"rd,dashie\"\n");
    assert_eq!(index.weight("rainbow_dash"), 1001);
    assert_eq!(index.weight("rd"), 500);
    assert_eq!(index.weight("dashie"), 500);
    assert_eq!(stats.alternate_tags, 2);
}

#[test]
fn alternate_weight_is_at_least_one() {
    let (index, _) = index_from("rare,0,1,\"alias\"\nzero,0,0,\"nothing\"\n");
    assert_eq!(index.weight("alias"), 1);
    assert_eq!(index.weight("nothing"), 1);
}

#[test]
fn alternates_never_overwrite_existing_tags() {
    let (index, stats) = index_from("pony,0,1000\nhorse,0,5000,\"pony\"\n");
    assert_eq!(index.weight("pony"), 1000);
    assert_eq!(stats.alternates_ignored, 1);
}

#[test]
fn later_primary_replaces_earlier_alternate() {
    let (index, _) = index_from("horse,0,5000,\"pony\"\npony,0,7\n");
    assert_eq!(index.weight("pony"), 7);
}

#[test]
fn primary_wins_case_insensitively() {
    let mut store = TagStore::new();
    store.insert_primary("Safe".into(), 10);
    store.insert_alternate("safe".into(), 99);
    assert!(store.is_primary("SAFE"));
    let index = TagIndex::from_store(store);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("safe").unwrap().tag, "Safe");
    assert_eq!(index.weight("safe"), 10);
}

#[test]
fn empty_primary_still_registers_alternates() {
    let (index, _) = index_from(",0,40,\"orphan\"\n");
    assert_eq!(order(&index), vec!["orphan"]);
    assert_eq!(index.weight("orphan"), 20);
}

#[test]
fn invalid_utf8_line_is_skipped() {
    let mut bytes = b"good,0,5\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b',', b'0', b',', b'1', b'\n']);
    bytes.extend_from_slice(b"fine,0,3\n");
    let (index, stats) = TagIndex::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(order(&index), vec!["good", "fine"]);
    assert_eq!(stats.skipped_rows, 1);
}

#[test]
fn from_records_dedups_case_insensitively() {
    let index = TagIndex::from_records(vec![
        TagRecord::new("OC", 5),
        TagRecord::new("oc", 900),
        TagRecord::new("  ", 1),
    ]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("oc").unwrap().tag, "OC");
}

#[test]
fn lookup_helpers() {
    let (index, _) = index_from("safe,0,30\nsolo,0,20\nduo,0,10\n");
    assert_eq!(index.position_lower("solo"), Some(1));
    assert!(index.get("missing").is_none());
    assert_eq!(index.weight("missing"), 0);
    let top: Vec<&str> = index.top(2).iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(top, vec!["safe", "solo"]);
    assert_eq!(index.top(10).len(), 3);
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "safe,0,2204259").unwrap();
    writeln!(file, "santa_hat,0,50000,\"christmas hat\"").unwrap();
    file.flush().unwrap();

    let (index, stats) = TagIndex::load(file.path()).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(stats.rows, 2);
    assert_eq!(index.weight("christmas hat"), 25000);
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TagIndex::load(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::SourceNotFound(_)));
}

#[test]
fn load_directory_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = TagIndex::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::SourceUnreadable { .. } | LoadError::SourceNotFound(_)
    ));
}
