use medac::platform::{
    Builder,
    Platform,
};
use medcore::platform::ConnectorOption;
use meddb::MemoryBackend;
use meddb_sqlite::SqliteBackend;
use std::sync::Arc;

pub async fn create_sqlite_backend() -> anyhow::Result<SqliteBackend> {
    Ok(SqliteBackend::ac(ConnectorOption::from("sqlite::memory:")).await?)
}

pub async fn create_sqlite_platform() -> anyhow::Result<Arc<Platform>> {
    let platform = Builder::new()
        .ac_platform(create_sqlite_backend().await?)
        .build()?;
    Ok(platform)
}

pub fn create_memory_platform() -> anyhow::Result<Arc<Platform>> {
    let platform = Builder::new()
        .ac_platform(MemoryBackend::new("memory:"))
        .build()?;
    Ok(platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_std::test]
    async fn smoke_test_create_platform() -> anyhow::Result<()> {
        create_sqlite_platform().await?;
        create_memory_platform()?;
        Ok(())
    }
}
