//! CSV export of the document and term tables.

use crate::error::Result;
use crate::index::{Index, TermRow};
use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DOC_TABLE_FILE: &str = "doc_table.csv";
pub const TERM_TABLE_FILE: &str = "term_table.csv";

pub fn write_doc_table<W: Write>(writer: W, index: &Index) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["Document ID", "Filename"])?;
    for (id, name) in index.doc_rows() {
        w.write_record([id.to_string().as_str(), name])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_term_table<W: Write>(writer: W, index: &Index) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["Term", "Document IDs with Frequencies", "Document Names"])?;
    for row in index.term_rows() {
        w.write_record([row.term, posting_ids(&row).as_str(), posting_names(&row).as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Write both tables into `dir`, creating it if needed.
pub fn save_csv<P: AsRef<Path>>(dir: P, index: &Index) -> Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    create_dir_all(dir)?;
    let doc_path = dir.join(DOC_TABLE_FILE);
    let term_path = dir.join(TERM_TABLE_FILE);
    write_doc_table(std::fs::File::create(&doc_path)?, index)?;
    write_term_table(std::fs::File::create(&term_path)?, index)?;
    tracing::info!(doc_table = %doc_path.display(), term_table = %term_path.display(), "saved csv");
    Ok((doc_path, term_path))
}

/// `{0: 2, 1: 1}`
fn posting_ids(row: &TermRow<'_>) -> String {
    let inner: Vec<String> = row.postings.iter().map(|(id, _, count)| format!("{id}: {count}")).collect();
    format!("{{{}}}", inner.join(", "))
}

/// `file1 (freq: 2), file2 (freq: 1)`
fn posting_names(row: &TermRow<'_>) -> String {
    row.postings
        .iter()
        .map(|(_, name, count)| format!("{name} (freq: {count})"))
        .collect::<Vec<_>>()
        .join(", ")
}
