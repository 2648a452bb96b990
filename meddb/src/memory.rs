//! An in-memory backend.
//!
//! Holds everything behind a lock for the lifetime of the process;
//! suitable for tests and for trying things out without a database.

use async_trait::async_trait;
use chrono::Utc;
use medcore::{
    ac::{
        traits::{
            PermissionBackend,
            UserBackend,
        },
        user::User,
        PermissionMatrix,
        Role,
    },
    error::BackendError,
    platform::PlatformUrl,
};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    permissions: HashMap<i64, PermissionMatrix>,
}

#[derive(Default)]
pub struct MemoryBackend {
    store: RwLock<Store>,
    url: String,
}

impl MemoryBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            .. Default::default()
        }
    }
}

impl Store {
    fn add_user(
        &mut self,
        name: &str,
        role: Role,
    ) -> Result<i64, BackendError> {
        if self.users.iter().any(|user| user.name == name) {
            return Err(BackendError::AppInvariantViolation(
                format!("user {name:?} already exists")
            ));
        }
        let id = self.users.len() as i64 + 1;
        self.users.push(User {
            id,
            name: name.to_string(),
            role,
            created_ts: Utc::now().timestamp(),
        });
        Ok(id)
    }
}

impl PlatformUrl for MemoryBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

#[async_trait]
impl UserBackend for MemoryBackend {
    async fn add_user(
        &self,
        name: &str,
        role: Role,
    ) -> Result<i64, BackendError> {
        self.store.write().add_user(name, role)
    }

    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError> {
        Ok(self.store.read()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn get_user_by_name(
        &self,
        name: &str,
    ) -> Result<Option<User>, BackendError> {
        Ok(self.store.read()
            .users
            .iter()
            .find(|user| user.name == name)
            .cloned())
    }
}

#[async_trait]
impl PermissionBackend for MemoryBackend {
    async fn provision_user(
        &self,
        name: &str,
        role: Role,
        matrix: &PermissionMatrix,
    ) -> Result<i64, BackendError> {
        let mut store = self.store.write();
        let id = store.add_user(name, role)?;
        store.permissions.insert(id, matrix.clone());
        Ok(id)
    }

    async fn get_permissions(
        &self,
        user_id: i64,
    ) -> Result<Option<PermissionMatrix>, BackendError> {
        Ok(self.store.read()
            .permissions
            .get(&user_id)
            .cloned())
    }

    async fn set_permissions(
        &self,
        user_id: i64,
        matrix: &PermissionMatrix,
    ) -> Result<(), BackendError> {
        let mut store = self.store.write();
        if !store.users.iter().any(|user| user.id == user_id) {
            return Err(BackendError::AppInvariantViolation(
                format!("no user with id {user_id}")
            ));
        }
        store.permissions.insert(user_id, matrix.clone());
        Ok(())
    }
}
