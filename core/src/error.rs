use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[error("document directory {0} does not exist or is not a directory")]
    MissingDirectory(PathBuf),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to start tally workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = core::result::Result<T, IndexError>;
