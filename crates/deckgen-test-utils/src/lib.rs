//! Shared PostgreSQL fixtures for deckgen integration tests.
//!
//! One PostgreSQL server is shared per test binary; every test gets its own
//! freshly-migrated database inside it.
//!
//! - **`DECKGEN_TEST_PG_URL`** set: use that server directly (CI starts one
//!   container up front).
//! - Otherwise a container is started through testcontainers on first use
//!   and kept alive in a `OnceCell` for the rest of the binary.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use testcontainers::ContainerAsync;
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use deckgen_db::pool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

struct SharedServer {
    /// Server root URL, no database name.
    base_url: String,
    /// `None` when an external server is used.
    _container: Option<ContainerAsync<Postgres>>,
}

static SHARED: OnceCell<SharedServer> = OnceCell::const_new();

async fn start_server() -> SharedServer {
    if let Ok(url) = std::env::var("DECKGEN_TEST_PG_URL") {
        return SharedServer {
            base_url: url.trim_end_matches('/').to_string(),
            _container: None,
        };
    }

    let container = Postgres::default()
        .with_tag("17")
        .start()
        .await
        .expect("failed to start PostgreSQL container");
    let host = container.get_host().await.expect("failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("failed to get mapped port");

    SharedServer {
        base_url: format!("postgresql://postgres:postgres@{host}:{port}"),
        _container: Some(container),
    }
}

/// Root URL of the shared server (starts it on first call).
pub async fn server_url() -> &'static str {
    &SHARED.get_or_init(start_server).await.base_url
}

async fn connect(url: &str, max_connections: u32) -> PgPool {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to {url}: {e}"))
}

/// A per-test database. Call [`TestDb::teardown`] at the end of the test.
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl TestDb {
    /// Create an empty database without running migrations.
    pub async fn empty() -> Self {
        let base = server_url().await;
        let name = format!("deckgen_test_{}", Uuid::new_v4().simple());

        let maint = connect(&format!("{base}/postgres"), 1).await;
        maint
            .execute(format!("CREATE DATABASE {name}").as_str())
            .await
            .unwrap_or_else(|e| panic!("failed to create database {name}: {e}"));
        maint.close().await;

        let pool = connect(&format!("{base}/{name}"), 5).await;
        Self { pool, name }
    }

    /// Create a database with all migrations applied.
    pub async fn migrated() -> Self {
        let db = Self::empty().await;
        pool::run_migrations(&db.pool)
            .await
            .expect("migrations should succeed");
        db
    }

    /// URL of this test database.
    pub async fn url(&self) -> String {
        format!("{}/{}", server_url().await, self.name)
    }

    /// Close the pool and drop the database.
    pub async fn teardown(self) {
        self.pool.close().await;
        drop_database(&self.name).await;
    }
}

/// Drop a database by name, terminating any remaining connections first.
/// Dropping a database that does not exist is not an error.
pub async fn drop_database(name: &str) {
    let maint = connect(&format!("{}/postgres", server_url().await), 1).await;

    let terminate = format!(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity \
         WHERE datname = '{name}' AND pid <> pg_backend_pid()"
    );
    let _ = maint.execute(terminate.as_str()).await;
    let _ = maint
        .execute(format!("DROP DATABASE IF EXISTS {name}").as_str())
        .await;
    maint.close().await;
}
