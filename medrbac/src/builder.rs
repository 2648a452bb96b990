use enumset::EnumSet;
use medcore::ac::{
    role::BYPASS_ROLES,
    PermissionMatrix,
    Role,
};
use crate::{
    authorizer,
    Enforcer,
    error::Error,
    simple::MatrixEnforcer,
};
#[cfg(feature = "casbin")]
use crate::casbin::CasbinEnforcer;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum Kind {
    #[default]
    Matrix,
    #[cfg(feature = "casbin")]
    Casbin,
}

/// Builds a role-based access controller (RBAC) for the practice.
///
/// Methods can be chained in order to set the configuration values.
/// The `Enforcer` is constructed by calling [`build`](Self::build).
///
/// New instances of the builder can be obtained via `Builder::default`
/// or `Builder::new`.  The former bypasses no roles while the latter
/// lets doctors and admins bypass the permission matrix.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    pub(crate) bypass_roles: EnumSet<Role>,
    pub(crate) matrices: Vec<(String, PermissionMatrix)>,
    pub(crate) kind: Kind,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            bypass_roles: BYPASS_ROLES,
            .. Default::default()
        }
    }

    pub fn bypass_roles(mut self, val: EnumSet<Role>) -> Self {
        self.bypass_roles = val;
        self
    }

    /// Whether the role bypasses the matrix for enforcers built here.
    pub fn is_bypass(&self, role: Role) -> bool {
        authorizer::is_bypass(self.bypass_roles, role)
    }

    /// Loads the matrix for the named secretary into enforcers that
    /// hold their own policy.  The matrix enforcer reads the matrix off
    /// the subject instead.
    pub fn subject_matrix(
        mut self,
        name: impl Into<String>,
        matrix: PermissionMatrix,
    ) -> Self {
        self.matrices.push((name.into(), matrix));
        self
    }

    #[cfg(feature = "casbin")]
    pub fn casbin(mut self) -> Self {
        self.kind = Kind::Casbin;
        self
    }

    pub async fn build(&self) -> Result<Box<dyn Enforcer<Error = Error>>, Error> {
        log::trace!("building a {}Enforcer", self.kind);
        Ok(match &self.kind {
            Kind::Matrix => Box::new(MatrixEnforcer::new(self.bypass_roles)),
            #[cfg(feature = "casbin")]
            Kind::Casbin => Box::new(
                CasbinEnforcer::new(
                    self.bypass_roles,
                    self.matrices.clone(),
                ).await?
            ),
        })
    }
}

mod display {
    use std::fmt::{Display, Formatter, Result};
    use super::Kind;

    impl Display for Kind {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match self {
                Kind::Matrix => f.write_str("Matrix"),
                #[cfg(feature = "casbin")]
                Kind::Casbin => f.write_str("Casbin"),
            }
        }
    }
}
