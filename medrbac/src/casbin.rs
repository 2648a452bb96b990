//! A casbin backed enforcer.
//!
//! Role resolution goes through the authorizer as for every other
//! enforcer.  Only the matrix check of a named secretary is handed to
//! casbin, where each loaded matrix becomes one policy per granted cell.
//! For named secretaries the matrices held by the enforcer are
//! authoritative and any matrix carried by the subject is ignored;
//! secretaries without a name are checked against their own matrix.

use casbin::{
    CoreApi,
    DefaultModel,
    MemoryAdapter,
    MgmtApi,
};
use enumset::EnumSet;
use medcore::ac::{
    traits::Enforcer,
    Action,
    PermissionMatrix,
    Resource,
    Role,
    Subject,
};

use crate::{
    authorizer,
    error::Error,
};

/// The casbin model for the practice.
const DEFAULT_MODEL: &str = "\
[request_definition]
r = sub, res, act

[policy_definition]
p = sub, res, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && r.res == p.res && r.act == p.act
";

pub struct CasbinEnforcer {
    bypass_roles: EnumSet<Role>,
    enforcer: casbin::Enforcer,
}

impl CasbinEnforcer {
    pub async fn new(
        bypass_roles: EnumSet<Role>,
        matrices: impl IntoIterator<Item = (String, PermissionMatrix)>,
    ) -> Result<Self, casbin::Error> {
        let m = DefaultModel::from_str(DEFAULT_MODEL).await?;
        let a = MemoryAdapter::default();
        let enforcer = casbin::Enforcer::new(m, a).await?;
        let mut result = Self { bypass_roles, enforcer };
        log::debug!("new CasbinEnforcer set up with bypass roles {bypass_roles:?}");
        for (name, matrix) in matrices {
            result.set_matrix(&name, &matrix).await?;
        }
        Ok(result)
    }

    fn to_user(name: &str) -> String {
        format!("u:{name}")
    }

    // the name to look up in casbin, for subjects whose decision rests
    // on a loaded matrix
    fn to_sub(&self, subject: &Subject) -> Option<String> {
        match (subject.role, subject.name()) {
            (Role::Secretary, Some(name))
                if !authorizer::is_bypass(self.bypass_roles, Role::Secretary) =>
                Some(Self::to_user(name)),
            _ => None,
        }
    }

    /// Replace the policies for the named secretary with those derived
    /// from the matrix.
    pub async fn set_matrix(
        &mut self,
        name: &str,
        matrix: &PermissionMatrix,
    ) -> Result<(), casbin::Error> {
        let sub = Self::to_user(name);
        self.enforcer.remove_filtered_named_policy("p", 0, vec![sub.clone()]).await?;
        let mut policies = Vec::new();
        for (resource, permit) in matrix.iter() {
            for action in permit.actions() {
                policies.push(vec![
                    sub.clone(),
                    resource.to_string(),
                    action.to_string(),
                ]);
            }
        }
        let n = policies.len();
        if n > 0 {
            self.enforcer.add_named_policies("p", policies).await?;
        }
        log::debug!("CasbinEnforcer loaded {n} policies for {sub}");
        Ok(())
    }

    fn casbin_enforce(
        &self,
        sub: &str,
        resource: Resource,
        action: Action,
    ) -> Result<bool, casbin::Error> {
        self.enforcer.enforce((
            sub,
            <&'static str>::from(resource),
            <&'static str>::from(action),
        ))
    }
}

impl Enforcer for CasbinEnforcer {
    type Error = Error;

    fn enforce(
        &self,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<bool, Self::Error> {
        match self.to_sub(subject) {
            Some(sub) => Ok(self.casbin_enforce(&sub, resource, action)?),
            None => Ok(authorizer::authorize_with(
                self.bypass_roles,
                subject.role,
                subject.permissions.as_ref(),
                resource,
                action,
            )),
        }
    }
}
