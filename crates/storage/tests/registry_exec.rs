use sb_storage::{Registry, RegistryError};
use std::path::Path;

fn write_file(root: &Path, relative: &str, contents: &str) {
    std::fs::write(root.join(relative), contents).expect("write fixture file");
}

fn users_registry() -> (tempfile::TempDir, Registry) {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(
        dir.path(),
        "users.sql",
        "-- name: create-table\n\
         CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)\n\
         \n\
         -- name: insert-user\n\
         INSERT INTO users (id, name)\n\
         VALUES (?1, ?2)\n\
         \n\
         -- name: select-user\n\
         SELECT name FROM users WHERE id = ?1\n",
    );
    let registry = Registry::new([dir.path()]).expect("load dir");
    (dir, registry)
}

#[test]
fn statements_run_against_connection() {
    let (_dir, registry) = users_registry();
    let mut session = registry.session();
    session.connect_in_memory().expect("connect");

    session
        .query("users/create-table")
        .expect("prepare create")
        .execute([])
        .expect("create table");
    let inserted = session
        .query("users/insert-user")
        .expect("prepare insert")
        .execute(rusqlite::params![7, "ada"])
        .expect("insert");
    assert_eq!(inserted, 1);

    let mut stmt = session.query("users/select-user").expect("prepare select");
    let name: String = stmt.query_row([7], |row| row.get(0)).expect("select");
    assert_eq!(name, "ada");
}

#[test]
fn connect_opens_database_file() {
    let (dir, registry) = users_registry();
    let mut session = registry.session();
    assert!(session.connection().is_none());

    session.connect(dir.path().join("app.db")).expect("connect");
    assert!(session.connection().is_some());
    session
        .query("users/create-table")
        .expect("prepare create")
        .execute([])
        .expect("create table");
    assert!(dir.path().join("app.db").is_file());
}

#[test]
fn sessions_on_separate_threads_share_one_registry() {
    let (dir, registry) = users_registry();
    let db = dir.path().join("shared.db");
    {
        let mut session = registry.session();
        session.connect(&db).expect("connect");
        session
            .query("users/create-table")
            .expect("prepare create")
            .execute([])
            .expect("create table");
    }

    std::thread::scope(|scope| {
        for id in 1..=4 {
            let registry = &registry;
            let db = &db;
            scope.spawn(move || {
                let mut session = registry.session();
                session.connect(db).expect("connect");
                session
                    .query("users/select-user")
                    .expect("prepare select")
                    .exists([id])
                    .expect("select");
            });
        }
    });
}

#[test]
fn try_query_requires_connection() {
    let (_dir, registry) = users_registry();
    assert!(matches!(
        registry.session().try_query("users/select-user"),
        Err(RegistryError::NotConnected)
    ));
}

#[test]
fn try_query_rejects_unknown_names() {
    let (_dir, registry) = users_registry();
    let mut session = registry.session();
    session.connect_in_memory().expect("connect");
    assert!(matches!(
        session.try_query("users/drop-everything"),
        Err(RegistryError::UnknownQuery(ref name)) if name == "users/drop-everything"
    ));
}

#[test]
fn try_query_surfaces_sql_errors() {
    let (_dir, registry) = users_registry();
    let mut session = registry.session();
    session.connect_in_memory().expect("connect");
    // The table has not been created yet.
    assert!(matches!(
        session.try_query("users/select-user"),
        Err(RegistryError::Sql(_))
    ));
}

#[test]
#[should_panic(expected = "must connect before creating a query")]
fn query_panics_without_connection() {
    let (_dir, registry) = users_registry();
    let _ = registry.session().query("users/select-user");
}

#[test]
#[should_panic(expected = "query not found with name users/missing")]
fn query_panics_on_unknown_name() {
    let (_dir, registry) = users_registry();
    let mut session = registry.session();
    session.connect_in_memory().expect("connect");
    let _ = session.query("users/missing");
}
