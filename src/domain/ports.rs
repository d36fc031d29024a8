use super::errors::DomainError;
use super::product::{Product, ProductDraft};

/// Storage operations the lifecycle service relies on.
///
/// Implementations are scoped to a single unit of work handed out by
/// [`ProductStore::transaction`].
pub trait ProductRepository {
    /// Inserts the draft when `draft.id` is `None`, otherwise overwrites the
    /// row with that id. Fails with `NotFound` when the id does not exist.
    fn save(&mut self, draft: ProductDraft) -> Result<Product, DomainError>;

    fn find_active_by_id(&mut self, id: i32) -> Result<Option<Product>, DomainError>;

    fn list_active(&mut self) -> Result<Vec<Product>, DomainError>;

    fn list_deleted(&mut self) -> Result<Vec<Product>, DomainError>;

    /// Flags the row as deleted without touching any other column.
    /// No-op for an unknown id.
    fn soft_delete(&mut self, id: i32) -> Result<(), DomainError>;
}

pub trait ProductStore: Send + Sync + 'static {
    /// Runs `f` atomically. Every write made inside `f` is discarded when it
    /// returns `Err`.
    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn ProductRepository) -> Result<T, DomainError>;
}
