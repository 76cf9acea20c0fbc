use crate::error::{IndexError, Result};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerates documents and hands out their raw bytes.
///
/// The order returned by [`DocumentSource::names`] is the order in which
/// document identifiers are assigned.
pub trait DocumentSource {
    fn names(&self) -> Result<Vec<String>>;
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Regular files directly inside one directory, sorted by file name.
pub struct DirectorySource {
    root: PathBuf,
    exclude: Option<String>,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf(), exclude: None }
    }

    /// Skip the file with this name (the stop-word file lives next to the documents).
    pub fn excluding(mut self, name: impl Into<String>) -> Self {
        self.exclude = Some(name.into());
        self
    }

    pub fn root(&self) -> &Path { &self.root }
}

impl DocumentSource for DirectorySource {
    fn names(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(IndexError::MissingDirectory(self.root.clone()));
        }
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.path().is_file() { continue; }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.exclude.as_deref() == Some(name.as_str()) { continue; }
            names.push(name);
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }
}

/// In-memory documents in a fixed order. An entry without content fails to read.
///
/// Names are unique: adding a name that is already present replaces its content
/// and keeps its original position.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    docs: Vec<(String, Option<Vec<u8>>)>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with(self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name.into(), Some(content.into()))
    }

    pub fn with_unreadable(self, name: impl Into<String>) -> Self {
        self.insert(name.into(), None)
    }

    fn insert(mut self, name: String, content: Option<Vec<u8>>) -> Self {
        match self.docs.iter().position(|(n, _)| *n == name) {
            Some(i) => self.docs[i].1 = content,
            None => self.docs.push((name, content)),
        }
        self
    }
}

impl DocumentSource for MemorySource {
    fn names(&self) -> Result<Vec<String>> {
        Ok(self.docs.iter().map(|(n, _)| n.clone()).collect())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        match self.docs.iter().find(|(n, _)| n == name) {
            Some((_, Some(bytes))) => Ok(bytes.clone()),
            Some((_, None)) => Err(io::Error::new(io::ErrorKind::InvalidData, format!("{name} is unreadable"))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("{name} not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_files_sorted_without_stop_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "cat").unwrap();
        fs::write(dir.path().join("a.txt"), "cow").unwrap();
        fs::write(dir.path().join("stop.txt"), "the").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.txt"), "cod").unwrap();

        let src = DirectorySource::new(dir.path()).excluding("stop.txt");
        assert_eq!(src.names().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(src.read("b.txt").unwrap(), b"cat");
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let src = DirectorySource::new(dir.path().join("nope"));
        assert!(matches!(src.names(), Err(IndexError::MissingDirectory(_))));
    }

    #[test]
    fn memory_source_keeps_order() {
        let src = MemorySource::new().with("z", "x").with_unreadable("a");
        assert_eq!(src.names().unwrap(), vec!["z", "a"]);
        assert!(src.read("a").is_err());
    }

    #[test]
    fn memory_source_names_stay_unique() {
        let src = MemorySource::new().with("a", "cat").with_unreadable("b").with("a", "cow").with("b", "cod");
        assert_eq!(src.names().unwrap(), vec!["a", "b"]);
        assert_eq!(src.read("a").unwrap(), b"cow");
        assert_eq!(src.read("b").unwrap(), b"cod");
    }
}
