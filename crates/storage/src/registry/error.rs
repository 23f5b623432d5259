#![forbid(unsafe_code)]

use sb_core::QueryError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{}: {source}", .path.display())]
    File { path: PathBuf, source: QueryError },
    #[error("io: {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("walk: {}: {source}", .path.display())]
    DirectoryWalk {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot derive a query prefix from {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("must connect before creating a query")]
    NotConnected,
    #[error("query not found with name {0}")]
    UnknownQuery(String),
}

impl RegistryError {
    pub(crate) fn from_query(path: PathBuf, err: QueryError) -> Self {
        match err {
            QueryError::Io(source) => Self::FileIo { path, source },
            source => Self::File { path, source },
        }
    }
}
