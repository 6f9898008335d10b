//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `repokit_core` end to end against an in-memory SQLite database.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Pass an absolute directory as the first argument to also write logs there.

use log::info;
use repokit_core::db::open_db_in_memory;
use repokit_core::{
    attributes, default_log_level, init_logging, Columns, EntityRepository, OrderBy, Repository,
    SqliteTable, Value, WhereEq, WithoutSoftDeleted,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(log_dir) = std::env::args().nth(1) {
        if let Err(message) = init_logging(default_log_level(), &log_dir) {
            eprintln!("repokit logging disabled: {message}");
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("repokit smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!("repokit_core version={}", repokit_core::core_version());

    let conn = open_db_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            tenant_id INTEGER NOT NULL,
            deleted_at TEXT
        );",
    )?;

    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "projects")?);
    for (name, tenant_id) in [("alpha", 1), ("beta", 2), ("gamma", 1), ("delta", 1)] {
        repo.create(&attributes([
            ("name", Value::from(name)),
            ("tenant_id", Value::from(tenant_id)),
        ]))?;
    }

    repo.permanent_criteria(WithoutSoftDeleted::default())
        .permanent_criteria(WhereEq::new("tenant_id", 1));
    repo.update(4, &attributes([("deleted_at", Value::from("2026-10-17"))]))?;

    repo.push_criteria(OrderBy::asc("name"));
    let names = repo
        .all(&Columns::only(["name"]))?
        .iter()
        .filter_map(|record| record.get_str("name").map(str::to_string))
        .collect::<Vec<_>>();
    println!("tenant=1 live projects={}", names.join(","));
    println!("tenant=1 live count={}", repo.count()?);

    match repo.find_or_fail(2, &Columns::All) {
        Ok(_) => println!("find_or_fail(2)=visible"),
        Err(err) if err.is_not_found() => println!("find_or_fail(2)=not_found"),
        Err(err) => return Err(err.into()),
    }

    info!("event=smoke_run module=cli status=ok");
    Ok(())
}
