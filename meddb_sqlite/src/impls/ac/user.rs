use async_trait::async_trait;
use chrono::Utc;
use medcore::{
    ac::{
        traits::UserBackend,
        user::User,
        Role,
    },
    error::BackendError,
};
use sqlx::{
    sqlite::SqliteRow,
    Row,
};
use std::str::FromStr;

use crate::SqliteBackend;

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    let role: &str = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        role: Role::from_str(role).unwrap_or_default(),
        created_ts: row.try_get("created_ts")?,
    })
}

async fn add_user_sqlite(
    backend: &SqliteBackend,
    name: &str,
    role: Role,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let role_str = <&'static str>::from(role);
    let id = sqlx::query(
        r#"
INSERT INTO 'user' (
    name,
    role,
    created_ts
)
VALUES ( ?1, ?2, ?3 )
        "#,
    )
    .bind(name)
    .bind(role_str)
    .bind(ts)
    .execute(&*backend.pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

async fn get_user_by_id_sqlite(
    backend: &SqliteBackend,
    id: i64,
) -> Result<Option<User>, BackendError> {
    let row = sqlx::query(r#"
SELECT
    id,
    name,
    role,
    created_ts
FROM
    'user'
WHERE
    id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(row.as_ref().map(user_from_row).transpose()?)
}

async fn get_user_by_name_sqlite(
    backend: &SqliteBackend,
    name: &str,
) -> Result<Option<User>, BackendError> {
    let row = sqlx::query(r#"
SELECT
    id,
    name,
    role,
    created_ts
FROM
    'user'
WHERE
    name = ?1
        "#,
    )
    .bind(name)
    .fetch_optional(&*backend.pool)
    .await?;
    Ok(row.as_ref().map(user_from_row).transpose()?)
}

#[async_trait]
impl UserBackend for SqliteBackend {
    async fn add_user(
        &self,
        name: &str,
        role: Role,
    ) -> Result<i64, BackendError> {
        add_user_sqlite(&self, name, role).await
    }

    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_id_sqlite(&self, id).await
    }

    async fn get_user_by_name(
        &self,
        name: &str,
    ) -> Result<Option<User>, BackendError> {
        get_user_by_name_sqlite(&self, name).await
    }
}
