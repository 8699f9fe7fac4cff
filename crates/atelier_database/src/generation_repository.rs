//! Repository for generation records.

use crate::{
    DatabaseResult, GenerationRow, NewGenerationRow, NewUsageEventRow, UpdateGenerationRow,
};
use atelier_error::{DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use uuid::Uuid;

/// Repository trait for generation record operations.
///
/// Deliberately narrow: the pipeline inserts a record once, finalizes it
/// once, and reads back by id. Listing, search, and deletion belong to
/// external collaborators.
pub trait GenerationRepository {
    /// Insert a new generation record.
    ///
    /// # Errors
    /// Returns DatabaseError if the insert fails or the connection drops.
    fn insert_generation(&mut self, new_row: NewGenerationRow) -> DatabaseResult<GenerationRow>;

    /// Apply a finalizing update to the record with the given id.
    ///
    /// # Errors
    /// Returns DatabaseError if no record with that id exists or the
    /// connection drops.
    fn update_generation(
        &mut self,
        id: Uuid,
        update: UpdateGenerationRow,
    ) -> DatabaseResult<GenerationRow>;

    /// Fetch a record by id.
    ///
    /// # Errors
    /// Returns DatabaseError if the connection drops.
    fn get_by_id(&mut self, id: Uuid) -> DatabaseResult<Option<GenerationRow>>;

    /// Insert a usage accounting event.
    ///
    /// # Errors
    /// Returns DatabaseError if the insert fails.
    fn insert_usage_event(&mut self, event: NewUsageEventRow) -> DatabaseResult<()>;
}

/// PostgreSQL implementation of GenerationRepository.
///
/// Uses a mutable reference to PgConnection. For concurrent access, wrap a
/// connection pool around it (see [`crate::PostgresStore`]).
pub struct PostgresGenerationRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PostgresGenerationRepository<'a> {
    /// Create a new repository with a mutable connection reference.
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl<'a> GenerationRepository for PostgresGenerationRepository<'a> {
    fn insert_generation(&mut self, new_row: NewGenerationRow) -> DatabaseResult<GenerationRow> {
        use crate::schema::generations;

        diesel::insert_into(generations::table)
            .values(&new_row)
            .get_result(self.conn)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }

    fn update_generation(
        &mut self,
        id: Uuid,
        update: UpdateGenerationRow,
    ) -> DatabaseResult<GenerationRow> {
        use crate::schema::generations::dsl;

        diesel::update(dsl::generations.filter(dsl::id.eq(id)))
            .set(&update)
            .get_result(self.conn)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }

    fn get_by_id(&mut self, id: Uuid) -> DatabaseResult<Option<GenerationRow>> {
        use crate::schema::generations::dsl;

        dsl::generations
            .filter(dsl::id.eq(id))
            .first(self.conn)
            .optional()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }

    fn insert_usage_event(&mut self, event: NewUsageEventRow) -> DatabaseResult<()> {
        use crate::schema::usage_events;

        diesel::insert_into(usage_events::table)
            .values(&event)
            .execute(self.conn)
            .map(|_| ())
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }
}
