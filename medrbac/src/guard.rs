use medcore::ac::{
    traits::Enforcer,
    Action,
    Resource,
    Subject,
};
use std::future::Future;

use crate::authorizer::authorize_subject;

/// The default outcome in place of a protected unit the subject may not
/// reach.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("no permission to {action} {resource}")]
pub struct Denied {
    pub resource: Resource,
    pub action: Action,
}

/// Runs a protected unit of work only for an authorized subject.
///
/// The decision is made once, when the guard is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guard {
    resource: Resource,
    action: Action,
    granted: bool,
}

impl Guard {
    pub fn new(
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Self {
        Self {
            resource,
            action,
            granted: authorize_subject(subject, resource, action),
        }
    }

    pub fn with_enforcer<E: Enforcer + ?Sized>(
        enforcer: &E,
        subject: &Subject,
        resource: Resource,
        action: Action,
    ) -> Result<Self, E::Error> {
        Ok(Self {
            resource,
            action,
            granted: enforcer.enforce(subject, resource, action)?,
        })
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }

    pub fn denied(&self) -> Denied {
        Denied {
            resource: self.resource,
            action: self.action,
        }
    }

    fn check(&self) -> Result<(), Denied> {
        if self.granted {
            Ok(())
        } else {
            log::debug!("guard denied {} {}", self.action, self.resource);
            Err(self.denied())
        }
    }

    pub fn run<T>(
        &self,
        protected: impl FnOnce() -> T,
    ) -> Result<T, Denied> {
        self.check()?;
        Ok(protected())
    }

    pub fn run_or<T>(
        &self,
        protected: impl FnOnce() -> T,
        fallback: impl FnOnce(Denied) -> T,
    ) -> T {
        match self.check() {
            Ok(()) => protected(),
            Err(denied) => fallback(denied),
        }
    }

    /// The protected future is dropped unpolled when denied.
    pub async fn run_async<T>(
        &self,
        protected: impl Future<Output = T>,
    ) -> Result<T, Denied> {
        self.check()?;
        Ok(protected.await)
    }
}
