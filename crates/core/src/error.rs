#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("line {line_no}: could not parse metadata line {line:?}")]
    MetadataParse { line_no: usize, line: String },
    #[error("unknown metadata key {key:?} with value {value:?}")]
    UnknownMetadataKey { key: String, value: String },
    #[error("found query without a name (prefix={prefix:?}, sql={sql:?})")]
    QueryWithoutName { prefix: String, sql: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
