pub mod error;
pub mod export;
pub mod index;
pub mod query;
pub mod source;
pub mod tokenizer;

pub use error::{IndexError, Result};
pub use index::{BuildOptions, DocumentTable, Index, IndexBuilder, PostingMap, TermRow, TermTable};
pub use query::{QuerySet, QueryTerm, ScoredResult};
pub use source::{DirectorySource, DocumentSource, MemorySource};
pub use tokenizer::StopWords;

/// Dense document identifier, assigned in enumeration order starting at 0.
pub type DocId = u32;
