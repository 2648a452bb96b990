use enumset::{
    EnumSet,
    EnumSetType,
};
use serde::{Deserialize, Serialize};

#[non_exhaustive]
#[derive(Debug, Default, EnumSetType, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // catch-all for whenever infallable conversion is needed
    #[default]
    Undefined,
    Doctor,
    Patient,
    Secretary,
    Admin,
}

/// The roles that are never checked against a permission matrix.
pub const BYPASS_ROLES: EnumSet<Role> = enumset::enum_set!(Role::Doctor | Role::Admin);

mod impls;
