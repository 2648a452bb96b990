use enumset::EnumSet;
use medcore::ac::{
    role::BYPASS_ROLES,
    Action,
    PermissionMatrix,
    Resource,
    Role,
    Subject,
};
use std::str::FromStr;

use crate::{
    checker::{
        check,
        parse_action,
        parse_resource,
    },
    error::Error,
};

/// Whether a subject of the role holding the matrix may perform the
/// action on the resource.
///
/// Doctors and admins bypass the matrix.  Secretaries are checked
/// against it, with a missing matrix denying everything.  Patients and
/// undefined roles are always denied.
pub fn authorize(
    role: Role,
    matrix: Option<&PermissionMatrix>,
    resource: Resource,
    action: Action,
) -> bool {
    authorize_with(BYPASS_ROLES, role, matrix, resource, action)
}

/// Whether the role bypasses the permission matrix under the set of
/// bypass roles.  Only these roles may administer matrices.
pub fn is_bypass(bypass_roles: EnumSet<Role>, role: Role) -> bool {
    bypass_roles.contains(role)
}

/// As [`authorize`], with an explicit set of bypass roles.
pub fn authorize_with(
    bypass_roles: EnumSet<Role>,
    role: Role,
    matrix: Option<&PermissionMatrix>,
    resource: Resource,
    action: Action,
) -> bool {
    let result = if is_bypass(bypass_roles, role) {
        true
    } else {
        match role {
            Role::Secretary => matrix
                .map(|matrix| check(matrix, resource, action))
                .unwrap_or(false),
            _ => false,
        }
    };
    log::trace!("authorize {role} {action} {resource}: {result}");
    result
}

/// As [`authorize`], for names from outside the crate.
///
/// An unrecognized role is denied; unknown resources and actions are
/// rejected.
pub fn authorize_str(
    role: &str,
    matrix: Option<&PermissionMatrix>,
    resource: &str,
    action: &str,
) -> Result<bool, Error> {
    let resource = parse_resource(resource)?;
    let action = parse_action(action)?;
    let role = Role::from_str(role).unwrap_or_default();
    Ok(authorize(role, matrix, resource, action))
}

pub fn authorize_subject(
    subject: &Subject,
    resource: Resource,
    action: Action,
) -> bool {
    authorize(subject.role, subject.permissions.as_ref(), resource, action)
}
