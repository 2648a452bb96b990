//! Access control
//!
//! Types describing who may do what against the protected resources of
//! the practice.  The decisions themselves are made by `medrbac`; the
//! types here only carry the data.

pub mod action;
pub mod matrix;
pub mod permit;
pub mod resource;
pub mod role;
pub mod subject;
pub mod traits;
pub mod user;

pub use self::{
    action::Action,
    matrix::PermissionMatrix,
    permit::Permit,
    resource::Resource,
    role::Role,
    subject::Subject,
};
