use serde::{Deserialize, Serialize};

use super::role::Role;

/// A stored account of the practice.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub created_ts: i64,
}
