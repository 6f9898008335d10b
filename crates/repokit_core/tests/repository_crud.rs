mod common;

use common::{users_db, users_db_with};
use repokit_core::{
    attributes, Columns, EntityRepository, Operator, Predicate, RepoError, Repository,
    SqliteError, SqliteTable, Value, WhereEq, WherePredicate, WithoutSoftDeleted,
};

fn user(name: &str, tenant_id: i64) -> repokit_core::Attributes {
    attributes([
        ("name", Value::from(name)),
        ("email", Value::from(format!("{name}@example.com"))),
        ("tenant_id", Value::from(tenant_id)),
    ])
}

#[test]
fn find_returns_record_or_none() {
    let conn = users_db_with(3);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let found = repo.find(2, &Columns::All).unwrap().unwrap();
    assert_eq!(found.get_str("email"), Some("user2@example.com"));

    assert!(repo.find(42, &Columns::All).unwrap().is_none());
}

#[test]
fn find_or_fail_reports_not_found() {
    let conn = users_db_with(3);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let found = repo.find_or_fail(3, &Columns::only(["id", "name"])).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found.get_str("name"), Some("user3"));

    let err = repo.find_or_fail(42, &Columns::All).unwrap_err();
    match err {
        RepoError::NotFound(detail) => {
            assert_eq!(detail.entity, "users");
            assert_eq!(detail.lookup, "id = 42");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn find_respects_criteria() {
    let conn = users_db_with(4);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    repo.push_criteria(WhereEq::new("tenant_id", 1));
    assert!(repo.find(2, &Columns::All).unwrap().is_none());
    assert!(repo.find(2, &Columns::All).unwrap().is_some());
}

#[test]
fn first_and_first_or_fail_on_same_input() {
    let conn = users_db();
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    assert!(repo.first(&Columns::All).unwrap().is_none());
    let err = repo.first_or_fail(&Columns::All).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "no users record matched first row");

    repo.create(&user("grace", 1)).unwrap();
    let first = repo.first_or_fail(&Columns::All).unwrap();
    assert_eq!(first.get_str("name"), Some("grace"));
}

#[test]
fn find_by_and_find_by_or_fail() {
    let conn = users_db_with(3);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let found = repo
        .find_by("email", "user1@example.com", &Columns::All)
        .unwrap()
        .unwrap();
    assert_eq!(found.get_i64("id"), Some(1));
    assert!(repo
        .find_by("email", "nobody@example.com", &Columns::All)
        .unwrap()
        .is_none());

    let err = repo
        .find_by_or_fail("email", "nobody@example.com", &Columns::All)
        .unwrap_err();
    match err {
        RepoError::NotFound(detail) => {
            assert_eq!(detail.lookup, "email = 'nobody@example.com'");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn create_returns_persisted_record() {
    let conn = users_db();
    let repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let created = repo.create(&user("linus", 2)).unwrap();
    assert_eq!(created.get_i64("id"), Some(1));
    assert_eq!(created.get_i64("tenant_id"), Some(2));
    assert_eq!(created.get("deleted_at"), Some(&Value::Null));
}

#[test]
fn update_targets_one_key_and_honors_criteria() {
    let conn = users_db_with(4);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let changed = repo
        .update(1, &attributes([("name", Value::from("renamed"))]))
        .unwrap();
    assert_eq!(changed, 1);
    let renamed = repo.find(1, &Columns::All).unwrap().unwrap();
    assert_eq!(renamed.get_str("name"), Some("renamed"));

    repo.push_criteria(WhereEq::new("tenant_id", 1));
    let changed = repo
        .update(2, &attributes([("name", Value::from("blocked"))]))
        .unwrap();
    assert_eq!(changed, 0);
}

#[test]
fn update_all_and_delete_all_follow_criteria() {
    let conn = users_db_with(6);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    repo.push_criteria(WhereEq::new("tenant_id", 2));
    let changed = repo
        .update_all(&attributes([("deleted_at", Value::from("2026-01-01"))]))
        .unwrap();
    assert_eq!(changed, 3);

    repo.permanent_criteria(WithoutSoftDeleted::default());
    assert_eq!(repo.count().unwrap(), 3);

    repo.clear_criteria();
    repo.push_criteria(WhereEq::new("tenant_id", 1));
    assert_eq!(repo.delete_all().unwrap(), 3);
    assert_eq!(repo.count().unwrap(), 3);
}

#[test]
fn delete_removes_by_key() {
    let conn = users_db_with(2);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    assert_eq!(repo.delete(1).unwrap(), 1);
    assert_eq!(repo.delete(1).unwrap(), 0);
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn engine_errors_pass_through_unchanged() {
    let conn = users_db_with(1);
    let repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    let err = repo
        .create(&attributes([
            ("name", Value::from("dup")),
            ("email", Value::from("user1@example.com")),
            ("tenant_id", Value::from(1)),
        ]))
        .unwrap_err();
    match err {
        RepoError::Persistence(inner) => {
            assert_eq!(
                inner.sqlite_error_code(),
                Some(rusqlite::ErrorCode::ConstraintViolation)
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_column_surfaces_as_persistence_error() {
    let conn = users_db_with(1);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    repo.push_criteria(WhereEq::new("missing_column", 1));
    let err = repo.all(&Columns::All).unwrap_err();
    assert!(matches!(err, RepoError::Persistence(SqliteError::Db(_))));
}

#[test]
fn misspelled_column_never_reaches_mutations() {
    let conn = users_db_with(6);
    let mut repo = EntityRepository::new(SqliteTable::new(&conn, "users").unwrap());

    repo.push_criteria(WhereEq::new("tennant_id", 1));
    assert!(matches!(
        repo.all(&Columns::All).unwrap_err(),
        RepoError::Persistence(SqliteError::Db(_))
    ));

    repo.push_criteria(WherePredicate(Predicate::compare(
        "tennant_id",
        Operator::NotEq,
        1,
    )));
    assert!(matches!(
        repo.delete_all().unwrap_err(),
        RepoError::Persistence(SqliteError::Db(_))
    ));

    repo.push_criteria(WhereEq::new("tennant_id", 2));
    assert!(repo
        .update_all(&attributes([("name", Value::from("gone"))]))
        .is_err());

    assert_eq!(repo.count().unwrap(), 6);
    assert!(repo
        .find_by("name", "gone", &Columns::All)
        .unwrap()
        .is_none());
}

#[test]
fn repository_works_over_borrowed_entity() {
    let conn = users_db_with(2);
    let table = SqliteTable::new(&conn, "users").unwrap();

    let mut first = EntityRepository::new(&table);
    let mut second = EntityRepository::new(&table);
    first.permanent_criteria(WhereEq::new("id", 1));

    assert_eq!(first.count().unwrap(), 1);
    assert_eq!(second.count().unwrap(), 2);
    assert_eq!(first.entity().table(), "users");
}
