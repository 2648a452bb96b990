use enumset::EnumSetType;
use serde::{Deserialize, Serialize};

/// Increasing levels of capability against a resource.
///
/// Declaration order is significant: a later action implies every
/// action declared before it.
#[derive(Debug, EnumSetType, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Edit,
    Manage,
}

mod impls;
