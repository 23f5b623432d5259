#![forbid(unsafe_code)]

mod args;
mod output;

use args::{Cli, Command};
use clap::Parser;
use sb_storage::{LoadOptions, Registry, Session};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SQLBOOK_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sqlbook: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let dirs = cli.resolve_dirs();
    if dirs.is_empty() {
        return Err(format!("no query directories given (use --dir or {})", args::DIRS_ENV).into());
    }
    let options = cli
        .extension
        .as_deref()
        .map(LoadOptions::with_extension)
        .unwrap_or_else(LoadOptions::from_env);

    let registry = Registry::with_options(options, &dirs)?;
    tracing::debug!(queries = registry.len(), "registry ready");

    match cli.command {
        Command::List { json: true } => println!("{}", output::list_json(&registry)?),
        Command::List { json: false } => {
            for name in registry.names() {
                println!("{name}");
            }
        }
        Command::Show { name } => {
            let query = registry
                .get(&name)
                .ok_or_else(|| sb_storage::RegistryError::UnknownQuery(name.clone()))?;
            println!("{}", query.sql().trim());
        }
        Command::Exec { name, params } => {
            let Some(db) = cli.db.as_deref() else {
                return Err("exec needs a database (use --db or SQLBOOK_DB)".into());
            };
            let mut session = registry.session();
            if Cli::is_memory_db(db) {
                session.connect_in_memory()?;
            } else {
                session.connect(db)?;
            }
            exec(&session, &name, &params)?;
        }
    }
    Ok(())
}

fn exec(session: &Session<'_>, name: &str, params: &[String]) -> Result<(), Box<dyn Error>> {
    let mut stmt = session.try_query(name)?;
    let columns = stmt.column_count();
    if columns == 0 {
        let changed = stmt.execute(rusqlite::params_from_iter(params))?;
        println!("{changed} row(s) affected");
        return Ok(());
    }

    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns);
        for index in 0..columns {
            let value: rusqlite::types::Value = row.get(index)?;
            cells.push(output::render_value(&value));
        }
        println!("{}", cells.join("\t"));
    }
    Ok(())
}
