#![forbid(unsafe_code)]

mod error;
mod loader;
mod meta;
mod query;

pub use error::QueryError;
pub use loader::{load_queries, load_str};
pub use meta::{MetaParseError, Metadata, NAME_KEY, parse_meta};
pub use query::Query;

pub mod paths {
    use std::path::{Component, Path};

    /// Namespace for the queries of one file: the path relative to its root,
    /// segments joined with `/`, final extension stripped.
    ///
    /// `content/posts.sql` becomes `content/posts`. Returns `None` for paths
    /// that climb out of the root, are absolute, or are not valid UTF-8.
    pub fn derive_prefix(relative: &Path) -> Option<String> {
        let mut segments = Vec::<&str>::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_str()?),
                Component::CurDir => continue,
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        let file = segments.pop()?;
        let stem = Path::new(file).file_stem()?.to_str()?;
        segments.push(stem);
        Some(segments.join("/"))
    }

    /// Full registry name for a query: `prefix/value`, or just `value` when
    /// the query was loaded without a path-derived prefix.
    pub fn qualified_name(prefix: &str, value: &str) -> String {
        if prefix.is_empty() {
            value.to_string()
        } else {
            format!("{prefix}/{value}")
        }
    }
}
