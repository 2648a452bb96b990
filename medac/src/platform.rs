//! The access control platform.
//!
//! Ties the stored accounts and permission matrices to the decisions
//! made by `medrbac`.  Administrative changes to a secretary's matrix
//! are made here, through the matrix write path, and persisted as a
//! whole matrix.

use medcore::platform::ACPlatform;
use medrbac::Builder as MedRbacBuilder;
use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    // platform
    ac_platform: Option<Arc<dyn ACPlatform>>,
    medrbac_builder: MedRbacBuilder,
}

pub struct Platform {
    ac_platform: Arc<dyn ACPlatform>,
    medrbac_builder: MedRbacBuilder,
}

mod impls;
