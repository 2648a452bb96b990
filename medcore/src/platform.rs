use crate::ac::traits::{
    PermissionBackend,
    UserBackend,
};

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// ACPlatform - Access Control Platform
///
/// This platform is used to persist the accounts and the permission
/// matrices consumed by the access control decisions.
///
/// This trait is applicable to everything that correctly implements the
/// relevant backends that compose this trait.
pub trait ACPlatform: PermissionBackend
    + UserBackend

    + PlatformUrl

    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn ACPlatform;
}

impl<P: PermissionBackend
    + UserBackend

    + PlatformUrl

    + Send
    + Sync
> ACPlatform for P {
    fn as_dyn(&self) -> &(dyn ACPlatform) {
        self
    }
}

/// Options for connecting to a backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectorOption {
    pub url: String,
    pub auto_create_db: bool,
}

impl ConnectorOption {
    pub fn auto_create_db(mut self, val: bool) -> Self {
        self.auto_create_db = val;
        self
    }
}

impl From<String> for ConnectorOption {
    fn from(url: String) -> Self {
        Self {
            url,
            .. Default::default()
        }
    }
}

impl From<&str> for ConnectorOption {
    fn from(url: &str) -> Self {
        url.to_string().into()
    }
}
