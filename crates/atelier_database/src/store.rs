//! Async store bridging the diesel repository onto the pipeline seams.

use crate::{
    GenerationRepository, NewGenerationRow, NewUsageEventRow, PostgresGenerationRepository,
    UpdateGenerationRow,
};
use async_trait::async_trait;
use atelier_core::{GenerationRecord, GenerationUpdate, NewGeneration};
use atelier_error::{AtelierResult, DatabaseError, DatabaseErrorKind};
use atelier_interface::{GenerationStore, UsageLedger};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use tracing::instrument;
use uuid::Uuid;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled PostgreSQL store implementing the async persistence seams.
///
/// Diesel is synchronous, so every operation checks a connection out of an
/// r2d2 pool and runs on the blocking thread pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("connections", &self.pool.state().connections)
            .finish_non_exhaustive()
    }
}

impl PostgresStore {
    /// Build a store over the given database URL.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the pool cannot be initialized.
    pub fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
        Ok(Self { pool })
    }

    /// Build a store from the `DATABASE_URL` environment variable.
    pub fn from_env() -> Result<Self, DatabaseError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "DATABASE_URL environment variable not set".to_string(),
            ))
        })?;
        Self::new(&database_url)
    }

    fn checkout(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, DatabaseError> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
    }

    async fn run_blocking<T, F>(&self, operation: F) -> AtelierResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let store = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = store.checkout()?;
            operation(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(format!("task join: {}", e))))?;
        Ok(result?)
    }
}

#[async_trait]
impl GenerationStore for PostgresStore {
    #[instrument(skip(self, generation))]
    async fn insert_generation(&self, generation: NewGeneration) -> AtelierResult<Uuid> {
        let new_row = NewGenerationRow::from(generation);
        self.run_blocking(move |conn| {
            let mut repo = PostgresGenerationRepository::new(conn);
            let row = repo.insert_generation(new_row)?;
            Ok(row.id)
        })
        .await
    }

    #[instrument(skip(self, update))]
    async fn update_generation(&self, id: Uuid, update: GenerationUpdate) -> AtelierResult<()> {
        let update_row = UpdateGenerationRow::from(update);
        self.run_blocking(move |conn| {
            let mut repo = PostgresGenerationRepository::new(conn);
            repo.update_generation(id, update_row)?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_generation(&self, id: Uuid) -> AtelierResult<Option<GenerationRecord>> {
        self.run_blocking(move |conn| {
            let mut repo = PostgresGenerationRepository::new(conn);
            repo.get_by_id(id)?
                .map(GenerationRecord::try_from)
                .transpose()
        })
        .await
    }
}

#[async_trait]
impl UsageLedger for PostgresStore {
    #[instrument(skip(self))]
    async fn record_generation(&self, user_id: Uuid) -> AtelierResult<()> {
        self.run_blocking(move |conn| {
            let mut repo = PostgresGenerationRepository::new(conn);
            repo.insert_usage_event(NewUsageEventRow::generation(user_id))
        })
        .await
    }
}
