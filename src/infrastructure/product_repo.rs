use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{ProductRepository, ProductStore};
use crate::domain::product::{Product, ProductDraft};
use crate::schema::products;

use super::models::{NewProductRow, ProductChangeset, ProductRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Infrastructure(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Infrastructure(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Product queries bound to one connection that is already inside a
/// transaction.
pub struct PgProductRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgProductRepository<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    fn load_by_status(&mut self, deleted: bool) -> Result<Vec<Product>, DomainError> {
        let rows = products::table
            .filter(products::deleted.eq(deleted))
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .load(self.conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

impl ProductRepository for PgProductRepository<'_> {
    fn save(&mut self, draft: ProductDraft) -> Result<Product, DomainError> {
        let row: ProductRow = match draft.id {
            None => diesel::insert_into(products::table)
                .values(&NewProductRow {
                    name: &draft.name,
                    price: draft.price,
                    creation_date: draft.creation_date,
                })
                .returning(ProductRow::as_returning())
                .get_result(self.conn)?,
            Some(id) => diesel::update(products::table.find(id))
                .set(&ProductChangeset {
                    name: &draft.name,
                    price: draft.price,
                    creation_date: draft.creation_date,
                })
                .returning(ProductRow::as_returning())
                .get_result(self.conn)
                .optional()?
                .ok_or(DomainError::NotFound)?,
        };

        Ok(row.into())
    }

    fn find_active_by_id(&mut self, id: i32) -> Result<Option<Product>, DomainError> {
        let row = products::table
            .filter(products::id.eq(id))
            .filter(products::deleted.eq(false))
            .select(ProductRow::as_select())
            .first(self.conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn list_active(&mut self) -> Result<Vec<Product>, DomainError> {
        self.load_by_status(false)
    }

    fn list_deleted(&mut self) -> Result<Vec<Product>, DomainError> {
        self.load_by_status(true)
    }

    fn soft_delete(&mut self, id: i32) -> Result<(), DomainError> {
        diesel::update(products::table.find(id))
            .set(products::deleted.eq(true))
            .execute(self.conn)?;
        Ok(())
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

pub struct DieselProductStore {
    pool: DbPool,
}

impl DieselProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductStore for DieselProductStore {
    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn ProductRepository) -> Result<T, DomainError>,
    {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut repo = PgProductRepository::new(conn);
            f(&mut repo)
        })
    }
}
