use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] medcore::error::BackendError),
    #[error(transparent)]
    Rbac(#[from] medrbac::error::Error),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User {0} is not a secretary")]
    NotSecretary(i64),
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("Misconfiguration: {0}")]
    Misconfiguration(&'static str),
}
