use medcore::{
    ac::{
        traits::{
            PermissionBackend,
            UserBackend,
        },
        user::User,
        Action,
        PermissionMatrix,
        Resource,
        Role,
        Subject,
    },
    platform::ACPlatform,
};
use medrbac::{
    writer,
    Builder as MedRbacBuilder,
    Enforcer,
    Guard,
};
use std::sync::Arc;

use crate::error::Error;

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self {
            medrbac_builder: MedRbacBuilder::new(),
            .. Default::default()
        }
    }

    pub fn ac_platform(mut self, val: impl ACPlatform + 'static) -> Self {
        self.ac_platform = Some(Arc::new(val));
        self
    }

    pub fn boxed_ac_platform(mut self, val: Arc<dyn ACPlatform>) -> Self {
        self.ac_platform = Some(val);
        self
    }

    pub fn medrbac_builder(mut self, val: MedRbacBuilder) -> Self {
        self.medrbac_builder = val;
        self
    }

    pub fn build(self) -> Result<Arc<Platform>, Error> {
        Ok(Arc::new(Platform {
            ac_platform: self.ac_platform
                .ok_or(Error::Misconfiguration("missing required argument ac_platform"))?,
            medrbac_builder: self.medrbac_builder,
        }))
    }
}

impl Platform {
    pub fn ac_platform(&self) -> &dyn ACPlatform {
        self.ac_platform.as_ref()
    }

    /// Whether the role bypasses the matrix on this platform; the same
    /// roles may administer the matrices of secretaries.
    pub fn is_bypass(&self, role: Role) -> bool {
        self.medrbac_builder.is_bypass(role)
    }
}

// User management.
impl Platform {
    /// Creates a user with the role.  Secretaries are provisioned with
    /// the default permission matrix, stored together with the user.
    pub async fn create_user(
        &self,
        name: &str,
        role: Role,
    ) -> Result<User, Error> {
        let id = match role {
            Role::Secretary => {
                let id = self.ac_platform.provision_user(
                    name,
                    role,
                    &PermissionMatrix::default_secretary(),
                ).await?;
                log::info!("provisioned secretary {name:?} with the default permissions");
                id
            }
            _ => self.ac_platform.add_user(name, role).await?,
        };
        self.get_user(id).await?
            .ok_or_else(|| Error::UnknownUser(id.to_string()))
    }

    pub async fn get_user(
        &self,
        id: i64,
    ) -> Result<Option<User>, Error> {
        Ok(self.ac_platform.get_user_by_id(id).await?)
    }

    pub async fn get_user_by_name(
        &self,
        name: &str,
    ) -> Result<Option<User>, Error> {
        Ok(self.ac_platform.get_user_by_name(name).await?)
    }

    /// The subject for the stored user, carrying the permission matrix
    /// where the user is a secretary.
    pub async fn get_subject(
        &self,
        id: i64,
    ) -> Result<Subject, Error> {
        let user = self.get_user(id).await?
            .ok_or_else(|| Error::UnknownUser(id.to_string()))?;
        self.subject_for_user(user).await
    }

    pub async fn subject_for_user(
        &self,
        user: User,
    ) -> Result<Subject, Error> {
        let permissions = match user.role {
            Role::Secretary => self.ac_platform.get_permissions(user.id).await?,
            _ => None,
        };
        Ok(Subject {
            permissions,
            .. user.into()
        })
    }
}

// Permission management
impl Platform {
    /// The stored permission matrix of the user, if one was ever stored.
    pub async fn get_permissions(
        &self,
        user_id: i64,
    ) -> Result<Option<PermissionMatrix>, Error> {
        Ok(self.ac_platform.get_permissions(user_id).await?)
    }

    fn require_admin(&self, actor: &Subject) -> Result<(), Error> {
        if self.is_bypass(actor.role) {
            Ok(())
        } else {
            log::warn!("{actor} may not change permissions");
            Err(Error::Unauthorized)
        }
    }

    async fn require_secretary(
        &self,
        user_id: i64,
    ) -> Result<User, Error> {
        let user = self.get_user(user_id).await?
            .ok_or_else(|| Error::UnknownUser(user_id.to_string()))?;
        match user.role {
            Role::Secretary => Ok(user),
            _ => Err(Error::NotSecretary(user_id)),
        }
    }

    /// Sets one cell of a secretary's matrix on behalf of the actor,
    /// cascading through the action hierarchy, and stores the result.
    pub async fn update_permission(
        &self,
        actor: &Subject,
        user_id: i64,
        resource: Resource,
        action: Action,
        value: bool,
    ) -> Result<PermissionMatrix, Error> {
        self.require_admin(actor)?;
        let user = self.require_secretary(user_id).await?;
        let current = self.ac_platform.get_permissions(user.id).await?
            .unwrap_or_default();
        let matrix = writer::write(&current, resource, action, value);
        self.ac_platform.set_permissions(user.id, &matrix).await?;
        log::info!("{actor} set {action}={value} on {resource} for {:?}", user.name);
        Ok(matrix)
    }

    /// Replaces the whole matrix of a secretary on behalf of the actor.
    /// The stored matrix is the normalized form of the one provided.
    pub async fn replace_permissions(
        &self,
        actor: &Subject,
        user_id: i64,
        matrix: &PermissionMatrix,
    ) -> Result<PermissionMatrix, Error> {
        self.require_admin(actor)?;
        let user = self.require_secretary(user_id).await?;
        let matrix = writer::normalize(matrix);
        self.ac_platform.set_permissions(user.id, &matrix).await?;
        log::info!("{actor} replaced the permissions for {:?}", user.name);
        Ok(matrix)
    }

    /// Restores the default matrix of a secretary on behalf of the actor.
    pub async fn reset_permissions(
        &self,
        actor: &Subject,
        user_id: i64,
    ) -> Result<PermissionMatrix, Error> {
        self.replace_permissions(
            actor,
            user_id,
            &PermissionMatrix::default_secretary(),
        ).await
    }
}

// Enforcement
impl Platform {
    async fn enforcer(
        &self,
        subject: &Subject,
    ) -> Result<Box<dyn Enforcer<Error = medrbac::error::Error>>, Error> {
        let builder = match (subject.name(), &subject.permissions) {
            (Some(name), Some(matrix)) => self.medrbac_builder
                .clone()
                .subject_matrix(name, matrix.clone()),
            _ => self.medrbac_builder.clone(),
        };
        Ok(builder.build().await?)
    }

    pub async fn enforce(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<bool, Error> {
        let result = self.enforcer(subject).await?
            .enforce(subject, resource, action)?;
        log::debug!("enforce {subject} {action} {resource}: {result}");
        Ok(result)
    }

    pub async fn enforce_user(
        &self,
        user_id: i64,
        resource: Resource,
        action: Action,
    ) -> Result<bool, Error> {
        let subject = self.get_subject(user_id).await?;
        self.enforce(&subject, resource, action).await
    }

    pub async fn guard(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<Guard, Error> {
        let enforcer = self.enforcer(subject).await?;
        Ok(Guard::with_enforcer(enforcer.as_ref(), subject, resource, action)?)
    }
}
