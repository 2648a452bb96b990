use medcore::platform::{
    ConnectorOption,
    PlatformUrl,
};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Sqlite,
};
use std::sync::Arc;

use crate::SqliteBackend;

mod ac;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        let pool = if opts.url.contains(":memory:") {
            // every connection to an in-memory database gets its own
            // database, so the pool must hold on to exactly one.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&opts.url)
                .await?
        } else {
            if opts.auto_create_db && !Sqlite::database_exists(&opts.url).await.unwrap_or(false) {
                log::warn!("sqlite database {} does not exist; creating...", &opts.url);
                Sqlite::create_database(&opts.url).await?
            }
            SqlitePoolOptions::new()
                .connect(&opts.url)
                .await?
        };
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url: opts.url,
        })
    }

    pub async fn migrate_ac(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("migrations/medac").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect and bring the schema up to date for access control.
    pub async fn ac(opts: ConnectorOption) -> Result<Self, sqlx::Error> {
        Self::connect(opts).await?
            .migrate_ac()
            .await
    }
}
