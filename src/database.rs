//! `PostgreSQL` connection pooling shared by the diesel adapters.

use crate::config::DatabaseConfig;
use crate::paging::Page;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by every diesel adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a lazily connecting pool from configuration.
#[must_use]
pub fn connection_pool(config: &DatabaseConfig) -> PgPool {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    Pool::builder()
        .max_size(config.pool_size.max(1))
        .build_unchecked(manager)
}

/// Port errors that can wrap an infrastructure failure.
pub(crate) trait PersistenceFailure: Sized {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs a blocking diesel closure on the blocking thread pool.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(E::from_failure)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_failure)?
}

/// Converts a page window into `OFFSET`/`LIMIT` values.
pub(crate) fn page_bounds<E: PersistenceFailure>(page: Page) -> Result<(i64, i64), E> {
    let offset = i64::try_from(page.skip).map_err(E::from_failure)?;
    let limit = i64::try_from(page.limit).map_err(E::from_failure)?;
    Ok((offset, limit))
}
