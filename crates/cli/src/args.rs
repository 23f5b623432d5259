#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub(crate) const DIRS_ENV: &str = "SQLBOOK_DIRS";
pub(crate) const MEMORY_DB: &str = ":memory:";

#[derive(Debug, Parser)]
#[command(
    name = "sqlbook",
    version,
    about = "Look up named SQL queries stored in annotated .sql files"
)]
pub(crate) struct Cli {
    /// Root directory to load queries from. Repeatable; falls back to
    /// SQLBOOK_DIRS (a path list) when omitted.
    #[arg(long = "dir", value_name = "DIR")]
    pub(crate) dirs: Vec<PathBuf>,

    /// Source file extension. Falls back to SQLBOOK_EXTENSION, then `sql`.
    #[arg(long, value_name = "EXT")]
    pub(crate) extension: Option<String>,

    /// SQLite database used by `exec` (`:memory:` for a scratch database).
    #[arg(long, value_name = "PATH", env = "SQLBOOK_DB")]
    pub(crate) db: Option<PathBuf>,

    /// Log loader activity at debug level.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub(crate) enum Command {
    /// Print every registered query name.
    List {
        /// Print name, prefix and SQL of every query as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the SQL of one query.
    Show { name: String },
    /// Run one query against --db, binding positional text parameters.
    Exec { name: String, params: Vec<String> },
}

impl Cli {
    pub(crate) fn resolve_dirs(&self) -> Vec<PathBuf> {
        if !self.dirs.is_empty() {
            return self.dirs.clone();
        }
        std::env::var_os(DIRS_ENV)
            .map(|raw| std::env::split_paths(&raw).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect()
    }

    pub(crate) fn is_memory_db(path: &std::path::Path) -> bool {
        path.as_os_str() == MEMORY_DB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_dirs_and_list() {
        let cli = Cli::try_parse_from([
            "sqlbook", "--dir", "sql", "--dir", "more/sql", "list", "--json",
        ])
        .unwrap();
        assert_eq!(
            cli.dirs,
            vec![PathBuf::from("sql"), PathBuf::from("more/sql")]
        );
        assert_eq!(cli.command, Command::List { json: true });
        assert_eq!(cli.resolve_dirs(), cli.dirs);
    }

    #[test]
    fn parses_exec_with_params() {
        let cli = Cli::try_parse_from([
            "sqlbook",
            "--dir",
            "sql",
            "--db",
            ":memory:",
            "exec",
            "users/select-user",
            "7",
            "ada",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Exec {
                name: "users/select-user".to_string(),
                params: vec!["7".to_string(), "ada".to_string()],
            }
        );
        assert!(Cli::is_memory_db(cli.db.as_deref().unwrap()));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["sqlbook", "show", "users/select-user", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Command::Show {
                name: "users/select-user".to_string()
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["sqlbook", "--dir", "sql"]).is_err());
    }
}
