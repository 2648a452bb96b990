use enumset::EnumSet;
use medcore::ac::{
    role::BYPASS_ROLES,
    traits::Enforcer,
    Action,
    Resource,
    Role,
    Subject,
};

use crate::{
    authorizer::authorize_with,
    error::Error,
};

/// An enforcer that decides directly from the subject's role and the
/// permission matrix it carries.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixEnforcer {
    bypass_roles: EnumSet<Role>,
}

impl MatrixEnforcer {
    pub fn new(bypass_roles: EnumSet<Role>) -> Self {
        Self { bypass_roles }
    }

    pub fn bypass_roles(&self) -> EnumSet<Role> {
        self.bypass_roles
    }
}

impl Default for MatrixEnforcer {
    fn default() -> Self {
        Self::new(BYPASS_ROLES)
    }
}

impl Enforcer for MatrixEnforcer {
    type Error = Error;

    fn enforce(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<bool, Self::Error> {
        Ok(authorize_with(
            self.bypass_roles,
            subject.role,
            subject.permissions.as_ref(),
            resource,
            action,
        ))
    }
}
