#![forbid(unsafe_code)]

use crate::error::QueryError;
use crate::meta::{Metadata, NAME_KEY};
use crate::paths::qualified_name;
use serde::Serialize;

/// A named SQL statement loaded from a `.sql` file.
///
/// While a file is being read the loader owns a `Query` as an accumulator;
/// [`Query::finish`] turns it into a committed record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    prefix: String,
    name: String,
    sql: String,
}

impl Query {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: String::new(),
            sql: String::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fully qualified name (`prefix/value`); empty until a `name`
    /// annotation has been applied.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn apply_metadata(&mut self, meta: &Metadata) -> Result<(), QueryError> {
        match meta.key.as_str() {
            NAME_KEY => {
                self.name = qualified_name(&self.prefix, &meta.value);
                Ok(())
            }
            _ => Err(QueryError::UnknownMetadataKey {
                key: meta.key.clone(),
                value: meta.value.clone(),
            }),
        }
    }

    /// Appends one body line, separated from what came before by a single
    /// space. No other normalization happens.
    pub fn append_sql(&mut self, line: &str) {
        self.sql.push(' ');
        self.sql.push_str(line);
    }

    pub fn finish(self) -> Result<Self, QueryError> {
        if self.name.is_empty() {
            return Err(QueryError::QueryWithoutName {
                prefix: self.prefix,
                sql: self.sql,
            });
        }
        Ok(self)
    }
}
