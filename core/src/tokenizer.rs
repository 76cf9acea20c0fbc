use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::io;
use std::path::Path;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Only terms starting with this character are indexed.
pub const TERM_PREFIX: char = 'c';

/// Normalized words excluded from indexing.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// One word per line, trimmed and lowercased. Blank lines are ignored.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load the stop-word file; a missing file yields the empty set.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Ok(Self::from_text(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no stop-word file, using empty set");
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Lowercase the raw text. Candidate terms are extracted from the result with [`terms`].
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Lazy sequence of candidate terms over already-normalized text.
///
/// A clone continues from the same position. Call [`terms`]
/// again to iterate from the beginning.
#[derive(Debug, Clone)]
pub struct Terms<'a> {
    text: &'a str,
    pos: usize,
    stop_words: &'a StopWords,
}

impl<'a> Iterator for Terms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(m) = WORD.find_at(self.text, self.pos) {
            self.pos = m.end();
            let token = m.as_str();
            if token.starts_with(TERM_PREFIX) && !self.stop_words.contains(token) {
                return Some(token);
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Extract maximal runs of word characters from `normalized` and keep those
/// that start with [`TERM_PREFIX`] and are not stop words.
pub fn terms<'a>(normalized: &'a str, stop_words: &'a StopWords) -> Terms<'a> {
    Terms { text: normalized, pos: 0, stop_words }
}

/// Normalize and filter in one go, for callers that want owned terms.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let normalized = normalize(text);
    terms(&normalized, stop_words).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_c_prefixed_terms() {
        let t = tokenize("Cats chase mice; the CAR crashed!", &StopWords::new());
        assert_eq!(t, vec!["cats", "chase", "car", "crashed"]);
    }

    #[test]
    fn punctuation_splits_terms() {
        let t = tokenize("can't co-op c_3po", &StopWords::new());
        assert_eq!(t, vec!["can", "co", "c_3po"]);
    }

    #[test]
    fn terms_is_lazy_and_restartable() {
        let stop = StopWords::from_words(["cow"]);
        let text = normalize("cow cat cod");
        let mut it = terms(&text, &stop);
        assert_eq!(it.next(), Some("cat"));
        assert_eq!(terms(&text, &stop).collect::<Vec<_>>(), vec!["cat", "cod"]);
        assert_eq!(it.next(), Some("cod"));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn stop_words_are_normalized() {
        let stop = StopWords::from_text("  Cat \n\nCOW\n");
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("cat"));
        assert!(stop.contains("cow"));
    }
}
