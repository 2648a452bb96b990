use medcore::ac::{
    Action,
    PermissionMatrix,
    Resource,
};
use std::str::FromStr;

use crate::error::Error;

/// Whether the matrix grants the action on the resource.
///
/// A resource absent from the matrix is denied.  The flag for the
/// action is read as stored; no hierarchy is inferred.
pub fn check(
    matrix: &PermissionMatrix,
    resource: Resource,
    action: Action,
) -> bool {
    matrix.get(resource)
        .map(|permit| permit.get(action))
        .unwrap_or(false)
}

/// As [`check`], for resource and action names from outside the crate.
pub fn check_str(
    matrix: &PermissionMatrix,
    resource: &str,
    action: &str,
) -> Result<bool, Error> {
    Ok(check(matrix, parse_resource(resource)?, parse_action(action)?))
}

pub(crate) fn parse_resource(resource: &str) -> Result<Resource, Error> {
    Resource::from_str(resource)
        .map_err(|_| Error::UnknownResource(resource.to_string()))
}

pub(crate) fn parse_action(action: &str) -> Result<Action, Error> {
    Action::from_str(action)
        .map_err(|_| Error::UnknownAction(action.to_string()))
}
