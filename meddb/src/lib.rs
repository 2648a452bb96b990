use medcore::platform::{
    ACPlatform,
    ConnectorOption,
};
#[cfg(feature = "sqlite")]
use meddb_sqlite::SqliteBackend;
use std::sync::Arc;

pub mod memory;
pub use memory::MemoryBackend;

pub struct Backend;

#[derive(Clone, Debug, PartialEq)]
pub struct Error(String);

#[derive(Debug)]
enum BackendKind {
    Memory,
    Sqlite,
}

mod display {
    use super::{BackendKind, Error};
    use std::fmt::{Display, Formatter, Result};

    impl Display for BackendKind {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match self {
                Self::Memory => "memory".fmt(f),
                Self::Sqlite => "sqlite".fmt(f),
            }
        }
    }

    impl Display for Error {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            self.0.fmt(f)
        }
    }

    impl std::error::Error for Error {}
}

impl TryFrom<&str> for BackendKind {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.split(':').next() {
            Some("memory") => Ok(BackendKind::Memory),
            Some("sqlite") => Ok(BackendKind::Sqlite),
            _ => Err(Error(format!("The connection string {s:?} is unsupported.")))
        }
    }
}

impl Backend {
    pub async fn ac(
        opts: impl Into<ConnectorOption> + Send,
    ) -> Result<Arc<dyn ACPlatform>, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let opts = opts.into();
        log::debug!("connecting to backend at {:?}", opts.url);
        match BackendKind::try_from(opts.url.as_str()) {
            Ok(BackendKind::Memory) => Ok(Arc::new(MemoryBackend::new(opts.url))),
            #[cfg(feature = "sqlite")]
            Ok(BackendKind::Sqlite) => Ok(Arc::new(SqliteBackend::ac(opts).await?)),
            #[cfg(not(feature = "sqlite"))]
            Ok(s) => Err(Box::new(Error(format!(
                "The feature {s:?} must be enabled for meddb in order to connect to {:?}",
                opts.url,
            )))),
            Err(e) => Err(Box::new(e)),
        }
    }
}
