use async_trait::async_trait;
use crate::error::BackendError;
use super::{
    action::Action,
    matrix::PermissionMatrix,
    resource::Resource,
    role::Role,
    subject::Subject,
    user::User,
};

/// Decides whether a subject may perform an action on a resource.
pub trait Enforcer {
    type Error;

    fn enforce(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<bool, Self::Error>;
}

#[async_trait]
pub trait UserBackend {
    async fn add_user(
        &self,
        name: &str,
        role: Role,
    ) -> Result<i64, BackendError>;
    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError>;
    async fn get_user_by_name(
        &self,
        name: &str,
    ) -> Result<Option<User>, BackendError>;
}

/// Persistence of permission matrices.
///
/// Writes replace the whole matrix for the user; concurrent writers
/// race with the last write winning.
#[async_trait]
pub trait PermissionBackend {
    /// Adds a user together with the matrix, storing both or neither.
    async fn provision_user(
        &self,
        name: &str,
        role: Role,
        matrix: &PermissionMatrix,
    ) -> Result<i64, BackendError>;
    async fn get_permissions(
        &self,
        user_id: i64,
    ) -> Result<Option<PermissionMatrix>, BackendError>;
    async fn set_permissions(
        &self,
        user_id: i64,
        matrix: &PermissionMatrix,
    ) -> Result<(), BackendError>;
}
