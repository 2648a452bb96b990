//! Permission matrix
//!
//! The full set of per-resource permits held by one subject.  Only
//! secretaries carry a matrix; the other roles are decided without one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    permit::Permit,
    resource::Resource,
};

/// Mapping of resource to the permit held against it.  A resource
/// without an entry is treated as all-false.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PermissionMatrix(BTreeMap<Resource, Permit>);

mod impls;
