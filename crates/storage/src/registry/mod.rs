#![forbid(unsafe_code)]

mod error;
mod exec;
mod options;
mod walk;

pub use error::RegistryError;
pub use exec::Session;
pub use options::{DEFAULT_EXTENSION, EXTENSION_ENV, LoadOptions};

use sb_core::Query;
use sb_core::paths::derive_prefix;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Named SQL queries loaded from one or more directory trees.
///
/// A query named `-- name: select-user` in `<root>/a/b/c.sql` is registered
/// as `a/b/c/select-user`. Names are unique across every loaded root; a
/// later registration silently replaces an earlier one with the same name.
///
/// Loading needs `&mut self`; once loading is done the registry is only
/// read, so shared references may be handed out freely, across threads
/// too. Execution goes through a [`Session`], which owns the connection.
#[derive(Debug, Default)]
pub struct Registry {
    queries: HashMap<String, Query>,
    options: LoadOptions,
}

impl Registry {
    pub fn new<I, P>(dirs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::with_options(LoadOptions::default(), dirs)
    }

    pub fn with_options<I, P>(options: LoadOptions, dirs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut registry = Self {
            queries: HashMap::new(),
            options,
        };
        for dir in dirs {
            registry.load_directory(dir)?;
        }
        Ok(registry)
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads every matching file below `dir`, nested directories included.
    ///
    /// All-or-nothing: if any file is malformed or unreadable nothing from
    /// `dir` is registered. Returns the number of queries registered.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let root = dir.as_ref();
        let files = walk::collect_source_files(root, &self.options)?;

        let mut staged = Vec::new();
        for file in &files {
            staged.extend(read_file(root, file)?);
        }

        let count = staged.len();
        for query in staged {
            self.insert(query);
        }
        tracing::info!(
            root = %root.display(),
            files = files.len(),
            queries = count,
            "loaded sql directory"
        );
        Ok(count)
    }

    pub fn has_query(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Query> {
        self.queries.get(name)
    }

    /// Raw SQL for `name`, or `""` when nothing is registered under it.
    /// Use [`Registry::get`] to tell an absent query from an empty body.
    pub fn query_text(&self, name: &str) -> &str {
        self.get(name).map(Query::sql).unwrap_or("")
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.queries.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Query)> {
        self.queries.iter().map(|(name, query)| (name.as_str(), query))
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    fn insert(&mut self, query: Query) {
        let name = query.name().to_string();
        if let Some(previous) = self.queries.insert(name, query) {
            tracing::warn!(name = previous.name(), "query registered twice, keeping the later one");
        }
    }
}

fn read_file(root: &Path, file: &Path) -> Result<Vec<Query>, RegistryError> {
    let prefix = file
        .strip_prefix(root)
        .ok()
        .and_then(derive_prefix)
        .ok_or_else(|| RegistryError::InvalidPath(file.to_path_buf()))?;

    let handle = File::open(file).map_err(|source| RegistryError::FileIo {
        path: file.to_path_buf(),
        source,
    })?;
    let queries = sb_core::load_queries(BufReader::new(handle), &prefix)
        .map_err(|err| RegistryError::from_query(file.to_path_buf(), err))?;

    tracing::debug!(
        path = %file.display(),
        prefix = %prefix,
        queries = queries.len(),
        "loaded sql file"
    );
    Ok(queries)
}
