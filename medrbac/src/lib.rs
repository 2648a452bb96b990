//! Role based access control for the practice.
//!
//! Doctors and admins are always authorized; secretaries are checked
//! against their permission matrix; everyone else is denied.  Every
//! decision in the workspace funnels through [`authorizer::authorize`],
//! directly or through an [`Enforcer`] built by the [`Builder`].

pub mod authorizer;
pub mod builder;
#[cfg(feature = "casbin")]
pub mod casbin;
pub mod checker;
pub mod error;
pub mod guard;
pub mod simple;
pub mod writer;

pub use medcore::ac::traits::Enforcer;
pub use crate::{
    authorizer::authorize,
    builder::Builder,
    checker::check,
    guard::{
        Denied,
        Guard,
    },
    writer::write,
};
