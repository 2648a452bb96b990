use async_trait::async_trait;
use chrono::Utc;
use medcore::{
    ac::{
        traits::PermissionBackend,
        PermissionMatrix,
        Permit,
        Role,
    },
    error::BackendError,
};
use sqlx::Row;
use std::collections::BTreeMap;

use crate::SqliteBackend;

async fn get_permissions_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
) -> Result<Option<PermissionMatrix>, BackendError> {
    let row = sqlx::query(r#"
SELECT
    matrix
FROM
    user_permission
WHERE
    user_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&*backend.pool)
    .await?;
    match row {
        Some(row) => {
            let matrix: &str = row.try_get("matrix")?;
            let entries: BTreeMap<String, Permit> = serde_json::from_str(matrix)?;
            Ok(Some(PermissionMatrix::from_lenient(entries)))
        }
        None => Ok(None),
    }
}

async fn set_permissions_sqlite(
    backend: &SqliteBackend,
    user_id: i64,
    matrix: &PermissionMatrix,
) -> Result<(), BackendError> {
    let ts = Utc::now().timestamp();
    let matrix = serde_json::to_string(matrix)?;
    sqlx::query(
        r#"
INSERT INTO user_permission (
    user_id,
    matrix,
    updated_ts
)
VALUES ( ?1, ?2, ?3 )
ON CONFLICT(user_id) DO UPDATE SET
    matrix = excluded.matrix,
    updated_ts = excluded.updated_ts
        "#,
    )
    .bind(user_id)
    .bind(matrix)
    .bind(ts)
    .execute(&*backend.pool)
    .await?;
    log::trace!("stored permissions for user {user_id}");
    Ok(())
}

async fn provision_user_sqlite(
    backend: &SqliteBackend,
    name: &str,
    role: Role,
    matrix: &PermissionMatrix,
) -> Result<i64, BackendError> {
    let ts = Utc::now().timestamp();
    let role_str = <&'static str>::from(role);
    let matrix = serde_json::to_string(matrix)?;
    let mut tx = backend.pool.begin().await?;
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
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
INSERT INTO user_permission (
    user_id,
    matrix,
    updated_ts
)
VALUES ( ?1, ?2, ?3 )
        "#,
    )
    .bind(id)
    .bind(matrix)
    .bind(ts)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    log::trace!("provisioned user {id} with permissions");
    Ok(id)
}

#[async_trait]
impl PermissionBackend for SqliteBackend {
    async fn provision_user(
        &self,
        name: &str,
        role: Role,
        matrix: &PermissionMatrix,
    ) -> Result<i64, BackendError> {
        provision_user_sqlite(&self, name, role, matrix).await
    }

    async fn get_permissions(
        &self,
        user_id: i64,
    ) -> Result<Option<PermissionMatrix>, BackendError> {
        get_permissions_sqlite(&self, user_id).await
    }

    async fn set_permissions(
        &self,
        user_id: i64,
        matrix: &PermissionMatrix,
    ) -> Result<(), BackendError> {
        set_permissions_sqlite(&self, user_id, matrix).await
    }
}

#[cfg(test)]
mod testing {
    use medcore::{
        ac::{
            traits::{
                PermissionBackend,
                UserBackend,
            },
            PermissionMatrix,
            Permit,
            Resource,
            Role,
        },
        platform::ConnectorOption,
    };
    use crate::SqliteBackend;

    async fn backend() -> anyhow::Result<SqliteBackend> {
        Ok(SqliteBackend::ac(ConnectorOption::from("sqlite::memory:")).await?)
    }

    #[async_std::test]
    async fn test_permissions_roundtrip() -> anyhow::Result<()> {
        let backend = backend().await?;
        let id = backend.add_user("sam", Role::Secretary).await?;
        assert_eq!(backend.get_permissions(id).await?, None);

        let matrix = PermissionMatrix::default_secretary();
        backend.set_permissions(id, &matrix).await?;
        assert_eq!(backend.get_permissions(id).await?, Some(matrix));

        // an empty matrix is stored, distinct from none at all
        backend.set_permissions(id, &PermissionMatrix::new()).await?;
        assert_eq!(backend.get_permissions(id).await?, Some(PermissionMatrix::new()));

        // last write wins
        let matrix = PermissionMatrix::from_iter([
            (Resource::Billing, Permit::all()),
        ]);
        backend.set_permissions(id, &matrix).await?;
        assert_eq!(backend.get_permissions(id).await?, Some(matrix));
        Ok(())
    }

    #[async_std::test]
    async fn test_provision_user() -> anyhow::Result<()> {
        let backend = backend().await?;
        let matrix = PermissionMatrix::default_secretary();
        let id = backend.provision_user("sam", Role::Secretary, &matrix).await?;
        let user = backend.get_user_by_id(id).await?
            .expect("user was provisioned");
        assert_eq!(user.role, Role::Secretary);
        assert_eq!(backend.get_permissions(id).await?, Some(matrix.clone()));

        // a clashing name stores neither the user nor a matrix
        assert!(backend.provision_user("sam", Role::Secretary, &matrix).await.is_err());
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_permission")
            .fetch_one(&*backend.pool)
            .await?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[async_std::test]
    async fn test_permissions_unknown_user() -> anyhow::Result<()> {
        let backend = backend().await?;
        assert!(backend.set_permissions(42, &PermissionMatrix::new()).await.is_err());
        Ok(())
    }

    #[async_std::test]
    async fn test_permissions_schema_drift() -> anyhow::Result<()> {
        let backend = backend().await?;
        let id = backend.add_user("sam", Role::Secretary).await?;
        sqlx::query("INSERT INTO user_permission (user_id, matrix, updated_ts) VALUES (?1, ?2, 0)")
            .bind(id)
            .bind(r#"{
                "billing": {"view": true, "edit": false, "manage": false},
                "pharmacy": {"view": true, "edit": true, "manage": true}
            }"#)
            .execute(&*backend.pool)
            .await?;
        let matrix = backend.get_permissions(id).await?
            .expect("matrix was stored");
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.permit(Resource::Billing), Permit::new(true, false, false));
        Ok(())
    }
}
