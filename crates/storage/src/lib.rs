#![forbid(unsafe_code)]

mod registry;

pub use registry::*;
pub use sb_core::{Query, QueryError};
