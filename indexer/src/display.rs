use std::io::{self, Write};
use tfindex_core::{Index, ScoredResult};

pub fn print_index<W: Write>(out: &mut W, index: &Index) -> io::Result<()> {
    writeln!(out, "Document Table:")?;
    writeln!(out, "---------------")?;
    for (id, name) in index.doc_rows() {
        writeln!(out, "ID: {id} -> {name}")?;
    }

    writeln!(out, "\nTerm Table:")?;
    writeln!(out, "-----------")?;
    for row in index.term_rows() {
        let ids: Vec<String> = row.postings.iter().map(|(id, _, _)| id.to_string()).collect();
        let details: Vec<String> = row.postings.iter().map(|(_, name, count)| format!("{name} (freq: {count})")).collect();
        writeln!(out, "'{}' appears in: [{}] ({})", row.term, ids.join(", "), details.join(", "))?;
    }
    Ok(())
}

/// `label` describes the query, e.g. `'cat' (weight: 2)`.
pub fn print_results<W: Write>(out: &mut W, label: &str, results: &[ScoredResult]) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No documents found for {label}.");
    }
    writeln!(out, "\nTop {} documents for {label}:", results.len())?;
    writeln!(out, "------------------------------------")?;
    for r in results {
        writeln!(out, "Document: {}, Score: {}", r.name, r.score)?;
    }
    Ok(())
}

pub fn print_json<W: Write>(out: &mut W, results: &[ScoredResult]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}
