use crate::error::Result;
use crate::source::{DirectorySource, DocumentSource};
use crate::tokenizer::{self, StopWords};
use crate::DocId;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Document id -> occurrence count, ordered by document id.
pub type PostingMap = BTreeMap<DocId, u32>;

/// Per-document term counts, before they are merged into the [`TermTable`].
type Tally = HashMap<String, u32>;

#[derive(Debug, Default, Clone)]
pub struct DocumentTable {
    names: Vec<String>,
}

impl DocumentTable {
    pub fn new() -> Self { Self::default() }

    /// Register a document and return its identifier (the next dense id).
    pub fn push(&mut self, name: impl Into<String>) -> DocId {
        let id = self.names.len() as DocId;
        self.names.push(name.into());
        id
    }

    pub fn name(&self, id: DocId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &str)> + '_ {
        self.names.iter().enumerate().map(|(i, n)| (i as DocId, n.as_str()))
    }
}

/// The inverted index: term -> posting map. Counts are always positive.
#[derive(Debug, Default, Clone)]
pub struct TermTable {
    terms: HashMap<String, PostingMap>,
}

impl TermTable {
    pub fn new() -> Self { Self::default() }

    /// Increment-or-initialize the count of `term` in `doc`. A zero count is a no-op
    /// so that no empty posting map is ever created.
    pub fn accumulate(&mut self, term: &str, doc: DocId, count: u32) {
        if count == 0 { return; }
        match self.terms.get_mut(term) {
            Some(postings) => *postings.entry(doc).or_insert(0) += count,
            None => {
                self.terms.insert(term.to_string(), PostingMap::from([(doc, count)]));
            }
        }
    }

    fn merge_tally(&mut self, doc: DocId, tally: Tally) {
        for (term, count) in tally {
            self.accumulate(&term, doc, count);
        }
    }

    pub fn postings(&self, term: &str) -> Option<&PostingMap> { self.terms.get(term) }

    pub fn contains(&self, term: &str) -> bool { self.terms.contains_key(term) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingMap)> + '_ {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Terms in lexicographic order.
    pub fn sorted(&self) -> Vec<(&str, &PostingMap)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

/// One term with its postings resolved to file names, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TermRow<'a> {
    pub term: &'a str,
    pub postings: Vec<(DocId, &'a str, u32)>,
}

/// Immutable result of one build: the document table and the term table.
#[derive(Debug, Default, Clone)]
pub struct Index {
    docs: DocumentTable,
    terms: TermTable,
}

impl Index {
    pub fn new(docs: DocumentTable, terms: TermTable) -> Self { Self { docs, terms } }

    pub fn docs(&self) -> &DocumentTable { &self.docs }

    pub fn terms(&self) -> &TermTable { &self.terms }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn doc_rows(&self) -> Vec<(DocId, &str)> { self.docs.iter().collect() }

    /// Term table ordered by term, then by document id.
    pub fn term_rows(&self) -> Vec<TermRow<'_>> {
        self.terms
            .sorted()
            .into_iter()
            .map(|(term, postings)| TermRow {
                term,
                postings: postings
                    .iter()
                    .map(|(&id, &count)| (id, self.docs.name(id).unwrap_or_default(), count))
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// File name of the stop-word list inside the document directory.
    pub stop_list: String,
    /// Worker threads used to tally documents.
    pub jobs: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { stop_list: "stoplist.txt".into(), jobs: 1 }
    }
}

pub struct IndexBuilder {
    stop_words: StopWords,
    jobs: usize,
}

impl IndexBuilder {
    pub fn new(stop_words: StopWords) -> Self { Self { stop_words, jobs: 1 } }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Index every regular file in `dir` except the stop-word file, which is
    /// also where the stop words are read from.
    pub fn from_dir<P: AsRef<Path>>(dir: P, opts: &BuildOptions) -> Result<Index> {
        let dir = dir.as_ref();
        let source = DirectorySource::new(dir).excluding(opts.stop_list.clone());
        let names = source.names()?;
        let stop_words = StopWords::load(dir.join(&opts.stop_list))?;
        tracing::info!(dir = %dir.display(), stop_words = stop_words.len(), "building index");
        Self::new(stop_words).jobs(opts.jobs).build_named(&source, names)
    }

    pub fn build<S: DocumentSource + Sync + ?Sized>(&self, source: &S) -> Result<Index> {
        let names = source.names()?;
        self.build_named(source, names)
    }

    fn build_named<S: DocumentSource + Sync + ?Sized>(&self, source: &S, names: Vec<String>) -> Result<Index> {
        tracing::info!(files = ?names, "processing files");
        let mut docs = DocumentTable::new();
        let mut terms = TermTable::new();

        if self.jobs <= 1 || names.len() <= 1 {
            for name in names {
                let id = docs.push(name);
                if let Some(tally) = self.tally(source, id, docs.name(id).unwrap_or_default()) {
                    terms.merge_tally(id, tally);
                }
            }
        } else {
            for name in &names {
                docs.push(name.as_str());
            }
            for (id, tally) in self.tally_parallel(source, &docs)?.into_iter().enumerate() {
                if let Some(tally) = tally {
                    terms.merge_tally(id as DocId, tally);
                }
            }
        }

        tracing::info!(num_docs = docs.len(), num_terms = terms.len(), "index built");
        Ok(Index { docs, terms })
    }

    /// Tallies come back in document id order, so the later merge never depends
    /// on which worker finished first.
    fn tally_parallel<S: DocumentSource + Sync + ?Sized>(&self, source: &S, docs: &DocumentTable) -> Result<Vec<Option<Tally>>> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build()?;
        let tallies: Vec<Option<Tally>> = pool.install(|| {
            (0..docs.len())
                .into_par_iter()
                .map(|i| {
                    let id = i as DocId;
                    self.tally(source, id, docs.name(id).unwrap_or_default())
                })
                .collect()
        });
        Ok(tallies)
    }

    /// Count candidate terms in one document. A read failure skips the document.
    fn tally<S: DocumentSource + ?Sized>(&self, source: &S, id: DocId, name: &str) -> Option<Tally> {
        let bytes = match source.read(name) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(doc_id = id, file = name, error = %e, "error processing file, skipping");
                return None;
            }
        };
        let text = tokenizer::normalize(&String::from_utf8_lossy(&bytes));
        let mut tally = Tally::new();
        for term in tokenizer::terms(&text, &self.stop_words) {
            match tally.get_mut(term) {
                Some(c) => *c += 1,
                None => { tally.insert(term.to_string(), 1); }
            }
        }
        tracing::debug!(doc_id = id, file = name, distinct_terms = tally.len(), "tallied document");
        Some(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn accumulate_initializes_then_increments() {
        let mut t = TermTable::new();
        t.accumulate("cat", 0, 2);
        t.accumulate("cat", 0, 1);
        t.accumulate("cat", 3, 1);
        t.accumulate("cow", 1, 0);
        assert_eq!(t.postings("cat"), Some(&PostingMap::from([(0, 3), (3, 1)])));
        assert!(!t.contains("cow"));
    }

    #[test]
    fn builds_two_file_corpus() {
        let src = MemorySource::new().with("file1", "cat cat dog").with("file2", "car bus cat");
        let index = IndexBuilder::new(StopWords::new()).build(&src).unwrap();
        assert_eq!(index.doc_rows(), vec![(0, "file1"), (1, "file2")]);
        assert_eq!(index.num_terms(), 2);
        assert_eq!(index.terms().postings("cat"), Some(&PostingMap::from([(0, 2), (1, 1)])));
        assert_eq!(index.terms().postings("car"), Some(&PostingMap::from([(1, 1)])));
    }

    #[test]
    fn unreadable_document_keeps_its_id() {
        let src = MemorySource::new().with_unreadable("broken").with("ok", "cat");
        let index = IndexBuilder::new(StopWords::new()).build(&src).unwrap();
        assert_eq!(index.docs().name(0), Some("broken"));
        assert_eq!(index.terms().postings("cat"), Some(&PostingMap::from([(1, 1)])));
    }

    #[test]
    fn term_rows_are_sorted() {
        let src = MemorySource::new().with("a", "cow cat").with("b", "cat");
        let index = IndexBuilder::new(StopWords::new()).build(&src).unwrap();
        let rows = index.term_rows();
        assert_eq!(rows[0].term, "cat");
        assert_eq!(rows[0].postings, vec![(0, "a", 1), (1, "b", 1)]);
        assert_eq!(rows[1].term, "cow");
    }
}
