#![allow(dead_code)]

use repokit_core::db::open_db_in_memory;
use repokit_core::{Criteria, Predicate, QueryBuilder};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// In-memory database with an empty `users` table.
pub fn users_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            tenant_id INTEGER NOT NULL,
            score REAL,
            deleted_at TEXT
        );",
    )
    .unwrap();
    conn
}

/// Inserts `count` users: ids `1..=count`, odd ids in tenant 1, even in tenant 2.
pub fn seed_users(conn: &Connection, count: i64) {
    for id in 1..=count {
        conn.execute(
            "INSERT INTO users (id, name, email, tenant_id, score) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                id,
                format!("user{id}"),
                format!("user{id}@example.com"),
                if id % 2 == 1 { 1 } else { 2 },
                id as f64 * 1.5,
            ],
        )
        .unwrap();
    }
}

pub fn users_db_with(count: i64) -> Connection {
    let conn = users_db();
    seed_users(&conn, count);
    conn
}

/// Shared log of criteria applications, in call order.
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<&'static str>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &'static str) {
        self.0.lock().unwrap().push(label);
    }

    /// Returns and clears the recorded labels.
    pub fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    /// Criteria that records `label` and leaves the query untouched.
    pub fn marker(&self, label: &'static str) -> Recorded {
        Recorded {
            label,
            trace: self.clone(),
            predicate: None,
        }
    }

    /// Criteria that records `label` and adds `predicate`.
    pub fn filtering(&self, label: &'static str, predicate: Predicate) -> Recorded {
        Recorded {
            label,
            trace: self.clone(),
            predicate: Some(predicate),
        }
    }
}

pub struct Recorded {
    label: &'static str,
    trace: Trace,
    predicate: Option<Predicate>,
}

impl<Q: QueryBuilder> Criteria<Q> for Recorded {
    fn apply(&self, query: Q) -> Q {
        self.trace.record(self.label);
        match &self.predicate {
            Some(predicate) => query.filter(predicate.clone()),
            None => query,
        }
    }
}
