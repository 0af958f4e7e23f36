//! Integration tests for PgUserRepository.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use roster_core::{NewUser, RosterError, UserId};
use roster_repository::{DatabasePool, DatabasePoolInterface, PgUserRepository, UserRepository};
use std::collections::HashSet;
use std::time::Duration;

/// Waits until every open connection is back in the pool.
async fn wait_until_idle(pool: &DatabasePool) {
    for _ in 0..50 {
        if pool.num_idle() as u32 == pool.size() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Connection was not returned to the pool");
}

async fn count_users_named(pool: &DatabasePool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT count(*) FROM users WHERE name = $1")
        .bind(name)
        .fetch_one(pool.inner())
        .await
        .expect("Count failed")
}

#[tokio::test]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.pool());

    let created = repo
        .create(&NewUser::new("Ada", "ada@example.com"))
        .await
        .expect("Failed to create user");
    assert_eq!(created.name, "Ada");
    assert_eq!(created.email, "ada@example.com");

    let found = repo
        .find_by_id(created.id)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found, created);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.pool());

    let result = repo.find_by_id(UserId::new(999)).await.expect("Query failed");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_first_id_is_one() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.pool());

    let created = repo
        .create(&NewUser::new("Ada", "ada@example.com"))
        .await
        .expect("Failed to create user");

    assert_eq!(created.id, UserId::new(1));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.pool());

    let creates = (0..20).map(|i| {
        let repo = repo.clone();
        async move {
            repo.create(&NewUser::new(format!("user{i}"), format!("user{i}@example.com")))
                .await
                .expect("Failed to create user")
        }
    });
    let users = futures::future::join_all(creates).await;

    let ids: HashSet<UserId> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let repo = PgUserRepository::new(pool.clone());

    let created = repo
        .create(&NewUser::new("Grace", "grace@example.com"))
        .await
        .expect("Failed to create user");

    pool.init_schema().await.expect("Second schema init failed");

    let found = repo.find_by_id(created.id).await.expect("Query failed");
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}

#[tokio::test]
async fn test_closed_pool_is_storage_error() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let repo = PgUserRepository::new(pool.clone());

    pool.close().await;

    let err = repo
        .create(&NewUser::new("Ada", "ada@example.com"))
        .await
        .expect_err("Insert on a closed pool must fail");
    assert!(err.is_storage_error());
}

#[tokio::test]
async fn test_failed_unit_of_work_rolls_back() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let mut uow = pool.begin().await.expect("Failed to begin");
    sqlx::query("INSERT INTO users (name, email) VALUES ($1, $2)")
        .bind("Ada")
        .bind("ada@example.com")
        .execute(uow.conn())
        .await
        .expect("Insert failed");

    let err = uow
        .finish::<()>(Err(sqlx::Error::Protocol("statement failed".to_string())))
        .await
        .expect_err("Failed outcome must surface as an error");
    assert!(err.is_storage_error());

    wait_until_idle(&pool).await;
    assert_eq!(count_users_named(&pool, "Ada").await, 0);
}

#[tokio::test]
async fn test_dropped_unit_of_work_rolls_back() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let mut uow = pool.begin().await.expect("Failed to begin");
    sqlx::query("INSERT INTO users (name, email) VALUES ($1, $2)")
        .bind("Grace")
        .bind("grace@example.com")
        .execute(uow.conn())
        .await
        .expect("Insert failed");
    drop(uow);

    wait_until_idle(&pool).await;
    assert_eq!(count_users_named(&pool, "Grace").await, 0);

    let repo = PgUserRepository::new(pool.clone());
    let created = repo
        .create(&NewUser::new("Grace", "grace@example.com"))
        .await
        .expect("Pool must still serve after an abandoned unit of work");
    assert_eq!(count_users_named(&pool, "Grace").await, 1);
    assert_eq!(repo.find_by_id(created.id).await.expect("Query failed"), Some(created));
}

#[tokio::test]
async fn test_unique_violation_is_conflict() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let mut uow = pool.begin().await.expect("Failed to begin");
    sqlx::query("CREATE TEMP TABLE handles (handle TEXT UNIQUE) ON COMMIT DROP")
        .execute(uow.conn())
        .await
        .expect("Create failed");
    sqlx::query("INSERT INTO handles (handle) VALUES ('ada')")
        .execute(uow.conn())
        .await
        .expect("First insert failed");
    let outcome = sqlx::query("INSERT INTO handles (handle) VALUES ('ada')")
        .execute(uow.conn())
        .await;

    let err = uow.finish(outcome).await.expect_err("Duplicate must fail");
    assert!(matches!(err, RosterError::Conflict(_)));
    assert!(err.is_storage_error());
    assert_eq!(err.status_code(), 500);
}
