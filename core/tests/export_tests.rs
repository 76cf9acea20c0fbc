use tfindex_core::export::{save_csv, write_doc_table, write_term_table};
use tfindex_core::{IndexBuilder, MemorySource, StopWords};

fn index() -> tfindex_core::Index {
    let src = MemorySource::new().with("file1", "cat cat dog").with("file, 2", "car bus cat");
    IndexBuilder::new(StopWords::new()).build(&src).unwrap()
}

#[test]
fn doc_table_csv() {
    let mut buf = Vec::new();
    write_doc_table(&mut buf, &index()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Document ID,Filename", "0,file1", "1,\"file, 2\""]);
}

#[test]
fn term_table_csv() {
    let mut buf = Vec::new();
    write_term_table(&mut buf, &index()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Term,Document IDs with Frequencies,Document Names");
    assert_eq!(lines[1], "car,{1: 1},\"file, 2 (freq: 1)\"");
    assert_eq!(lines[2], "cat,\"{0: 2, 1: 1}\",\"file1 (freq: 2), file, 2 (freq: 1)\"");
}

#[test]
fn save_csv_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let (docs, terms) = save_csv(&out, &index()).unwrap();
    assert!(std::fs::read_to_string(docs).unwrap().starts_with("Document ID,Filename"));
    assert!(std::fs::read_to_string(terms).unwrap().starts_with("Term,"));
}
