#![forbid(unsafe_code)]

use crate::error::QueryError;
use crate::meta::{NAME_KEY, parse_meta};
use crate::query::Query;
use std::io::BufRead;

enum LoaderState {
    NoActiveRecord,
    Accumulating(Query),
}

/// Reads every query out of one annotated SQL source.
///
/// A `-- name: ...` line closes the record in progress (if any) and opens a
/// new one; every other annotation is applied to the open record and every
/// other line is appended to its SQL. Any malformed line or unnamed record
/// fails the whole source, so callers either get every record or none.
pub fn load_queries<R: BufRead>(reader: R, prefix: &str) -> Result<Vec<Query>, QueryError> {
    let mut out = Vec::new();
    let mut state = LoaderState::NoActiveRecord;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        let meta = parse_meta(line).map_err(|err| QueryError::MetadataParse {
            line_no: index + 1,
            line: err.line,
        })?;

        state = match (state, meta) {
            (state, Some(meta)) if meta.key == NAME_KEY => {
                if let LoaderState::Accumulating(current) = state {
                    out.push(commit(current)?);
                }
                let mut query = Query::new(prefix);
                query.apply_metadata(&meta)?;
                LoaderState::Accumulating(query)
            }
            (LoaderState::NoActiveRecord, None) if line.is_empty() => LoaderState::NoActiveRecord,
            (LoaderState::NoActiveRecord, Some(meta)) => {
                let mut query = Query::new(prefix);
                query.apply_metadata(&meta)?;
                LoaderState::Accumulating(query)
            }
            (LoaderState::NoActiveRecord, None) => {
                let mut query = Query::new(prefix);
                query.append_sql(line);
                LoaderState::Accumulating(query)
            }
            (LoaderState::Accumulating(mut query), Some(meta)) => {
                query.apply_metadata(&meta)?;
                LoaderState::Accumulating(query)
            }
            (LoaderState::Accumulating(mut query), None) => {
                query.append_sql(line);
                LoaderState::Accumulating(query)
            }
        };
    }

    if let LoaderState::Accumulating(current) = state {
        out.push(commit(current)?);
    }
    Ok(out)
}

pub fn load_str(raw: &str, prefix: &str) -> Result<Vec<Query>, QueryError> {
    load_queries(raw.as_bytes(), prefix)
}

fn commit(query: Query) -> Result<Query, QueryError> {
    let query = query.finish()?;
    tracing::trace!(name = query.name(), "query finalized");
    Ok(query)
}
