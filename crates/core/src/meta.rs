#![forbid(unsafe_code)]

/// The only annotation key the loader understands.
pub const NAME_KEY: &str = "name";

const MARKER: &str = "--";

/// One `-- key: value` annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("could not parse metadata line {line:?}")]
pub struct MetaParseError {
    pub line: String,
}

/// Classifies a single line.
///
/// - `Ok(Some(_))`: the line is an annotation of the shape `-- key: value`.
/// - `Ok(None)`: the line does not start with `--`; it is SQL body text.
/// - `Err(_)`: the line starts with `--` but is not a well-formed annotation.
///
/// Keys and values are limited to ASCII letters, digits, `-` and `_`.
/// Trailing whitespace is allowed, anything else after the value is not.
pub fn parse_meta(line: &str) -> Result<Option<Metadata>, MetaParseError> {
    let Some(rest) = line.strip_prefix(MARKER) else {
        return Ok(None);
    };
    let malformed = || MetaParseError {
        line: line.trim_end().to_string(),
    };

    let rest = skip_blanks(rest).ok_or_else(malformed)?;
    let (key, rest) = take_ident(rest).ok_or_else(malformed)?;
    let rest = rest.strip_prefix(':').ok_or_else(malformed)?;
    let rest = skip_blanks(rest).ok_or_else(malformed)?;
    let (value, rest) = take_ident(rest).ok_or_else(malformed)?;
    if !rest.trim_end().is_empty() {
        return Err(malformed());
    }

    Ok(Some(Metadata {
        key: key.to_string(),
        value: value.to_string(),
    }))
}

// At least one space or tab is required.
fn skip_blanks(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start_matches([' ', '\t']);
    (trimmed.len() < raw.len()).then_some(trimmed)
}

fn take_ident(raw: &str) -> Option<(&str, &str)> {
    let end = raw
        .find(|ch: char| !is_ident_char(ch))
        .unwrap_or(raw.len());
    (end > 0).then(|| raw.split_at(end))
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_')
}
