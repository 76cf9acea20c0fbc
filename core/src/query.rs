use crate::error::Result;
use crate::index::Index;
use crate::DocId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A normalized term with the weight applied to its occurrence counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTerm {
    pub term: String,
    pub weight: f64,
}

impl QueryTerm {
    pub fn new(term: &str, weight: f64) -> Self {
        Self { term: term.to_lowercase(), weight }
    }

    /// Parse a `term weight` line. Lines with fewer than two tokens yield `None`;
    /// a weight that does not parse to a finite number falls back to [`DEFAULT_WEIGHT`].
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let (term, weight) = match (parts.next(), parts.next()) {
            (Some(t), Some(w)) => (t, w),
            _ => return None,
        };
        let weight = match weight.parse::<f64>() {
            Ok(w) if w.is_finite() => w,
            _ => {
                tracing::warn!(term, weight, "invalid weight, using default weight {DEFAULT_WEIGHT}");
                DEFAULT_WEIGHT
            }
        };
        Some(Self::new(term, weight))
    }
}

/// Terms of a multi-term query, one per line of a query file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuerySet {
    pub terms: Vec<QueryTerm>,
}

impl QuerySet {
    pub fn parse(text: &str) -> Self {
        let mut terms = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() { continue; }
            match QueryTerm::parse_line(line) {
                Some(t) => terms.push(t),
                None => tracing::warn!(line, "ignoring invalid line"),
            }
        }
        Self { terms }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    pub name: String,
    pub score: f64,
}

/// Scores keyed by document id, remembering the order documents were first scored.
#[derive(Default)]
struct ScoreBoard {
    order: Vec<(DocId, f64)>,
    slot: HashMap<DocId, usize>,
}

impl ScoreBoard {
    fn add(&mut self, doc: DocId, score: f64) {
        match self.slot.get(&doc) {
            Some(&i) => self.order[i].1 += score,
            None => {
                self.slot.insert(doc, self.order.len());
                self.order.push((doc, score));
            }
        }
    }
}

impl Index {
    /// `count * weight` for every document containing `term`, in document id order.
    /// An unindexed term is not an error and yields nothing.
    pub fn score_term(&self, term: &str, weight: f64) -> Vec<(DocId, f64)> {
        let term = term.to_lowercase();
        match self.terms().postings(&term) {
            Some(postings) => postings.iter().map(|(&doc, &count)| (doc, count as f64 * weight)).collect(),
            None => {
                tracing::info!(term = %term, "word not found in the index");
                Vec::new()
            }
        }
    }

    /// Top `top_n` documents for a single weighted term.
    pub fn find(&self, term: &str, weight: f64, top_n: usize) -> Vec<ScoredResult> {
        self.rank(self.score_term(term, weight), top_n)
    }

    /// Top `top_n` documents by the summed scores of all query terms. Documents
    /// matching none of the terms are absent.
    pub fn find_multi(&self, query: &[QueryTerm], top_n: usize) -> Vec<ScoredResult> {
        let mut board = ScoreBoard::default();
        for q in query {
            for (doc, score) in self.score_term(&q.term, q.weight) {
                board.add(doc, score);
            }
        }
        self.rank(board.order, top_n)
    }

    /// Stable sort by descending score, truncate, then resolve names.
    fn rank(&self, mut scores: Vec<(DocId, f64)>, top_n: usize) -> Vec<ScoredResult> {
        scores.sort_by(|a, b| by_score_desc(a.1, b.1));
        scores.truncate(top_n);
        scores
            .into_iter()
            .map(|(doc, score)| ScoredResult {
                name: self.docs().name(doc).unwrap_or_default().to_string(),
                score,
            })
            .collect()
    }
}

/// Descending total order. NaN (e.g. `inf + -inf` from huge opposite weights)
/// ranks after every number.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_defaults_bad_weight() {
        assert_eq!(QueryTerm::parse_line("Cat 1.5"), Some(QueryTerm::new("cat", 1.5)));
        assert_eq!(QueryTerm::parse_line("cat heavy"), Some(QueryTerm::new("cat", 1.0)));
        assert_eq!(QueryTerm::parse_line("cat inf"), Some(QueryTerm::new("cat", 1.0)));
        assert_eq!(QueryTerm::parse_line("cat -2 extra"), Some(QueryTerm::new("cat", -2.0)));
        assert_eq!(QueryTerm::parse_line("cat"), None);
    }

    #[test]
    fn query_set_skips_blank_and_short_lines() {
        let q = QuerySet::parse("cat 1.5\n\n  \nlonely\ncar 2.0\n");
        assert_eq!(q.terms, vec![QueryTerm::new("cat", 1.5), QueryTerm::new("car", 2.0)]);
    }

    #[test]
    fn nan_sorts_after_numbers() {
        let mut v = vec![f64::NAN, 1.0, -f64::NAN, 9.0, f64::NEG_INFINITY, 4.0];
        v.sort_by(|a, b| by_score_desc(*a, *b));
        assert_eq!(&v[..4], &[9.0, 4.0, 1.0, f64::NEG_INFINITY]);
        assert!(v[4..].iter().all(|s| s.is_nan()));
    }

    #[test]
    fn score_board_keeps_first_seen_order() {
        let mut b = ScoreBoard::default();
        b.add(4, 1.0);
        b.add(2, 1.0);
        b.add(4, 0.5);
        assert_eq!(b.order, vec![(4, 1.5), (2, 1.0)]);
    }
}
