//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use roster_core::{with_timeout, NewUser, RosterResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: &NewUser) -> RosterResult<User> {
        debug!("Inserting user: {}", new_user.name);

        with_timeout(self.pool.statement_timeout(), "insert user", async {
            let mut uow = self.pool.begin().await?;
            let outcome = sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (name, email)
                VALUES ($1, $2)
                RETURNING id, name, email
                "#,
            )
            .bind(&new_user.name)
            .bind(&new_user.email)
            .fetch_one(uow.conn())
            .await;

            uow.finish(outcome).await.map(User::from)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        with_timeout(self.pool.statement_timeout(), "find user", async {
            let mut uow = self.pool.begin().await?;
            let outcome = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, name, email
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.into_inner())
            .fetch_optional(uow.conn())
            .await;

            Ok(uow.finish(outcome).await?.map(User::from))
        })
        .await
    }
}
