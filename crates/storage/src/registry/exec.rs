#![forbid(unsafe_code)]

use super::{Registry, RegistryError};
use rusqlite::{Connection, Statement};
use std::path::Path;

/// Runs registered queries against a SQLite connection.
///
/// The connection lives here rather than in [`Registry`] so the registry
/// stays `Sync`; each thread that executes queries opens its own session.
#[derive(Debug)]
pub struct Session<'r> {
    registry: &'r Registry,
    conn: Option<Connection>,
}

impl Registry {
    pub fn session(&self) -> Session<'_> {
        Session {
            registry: self,
            conn: None,
        }
    }
}

impl<'r> Session<'r> {
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Opens (or creates) the SQLite database at `path` for [`Session::query`].
    pub fn connect(&mut self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "connected");
        self.conn = Some(conn);
        Ok(())
    }

    pub fn connect_in_memory(&mut self) -> Result<(), RegistryError> {
        self.conn = Some(Connection::open_in_memory()?);
        tracing::debug!("connected to in-memory database");
        Ok(())
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    /// Prepares the query registered as `name` on the open connection.
    ///
    /// # Panics
    ///
    /// Panics if [`Session::connect`] has not been called or if no query is
    /// registered as `name`. Both are programming errors; use
    /// [`Session::try_query`] to handle them as values.
    pub fn query(&self, name: &str) -> Result<Statement<'_>, RegistryError> {
        match self.try_query(name) {
            Err(RegistryError::NotConnected) => panic!("must connect before creating a query"),
            Err(RegistryError::UnknownQuery(name)) => panic!("query not found with name {name}"),
            other => other,
        }
    }

    pub fn try_query(&self, name: &str) -> Result<Statement<'_>, RegistryError> {
        let conn = self.conn.as_ref().ok_or(RegistryError::NotConnected)?;
        let query = self
            .registry
            .get(name)
            .ok_or_else(|| RegistryError::UnknownQuery(name.to_string()))?;
        Ok(conn.prepare(query.sql())?)
    }
}
