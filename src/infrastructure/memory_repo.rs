use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::ports::{ProductRepository, ProductStore};
use crate::domain::product::{Product, ProductDraft, ProductStatus};

/// Process-local product store.
///
/// A transaction works on a copy of the current state and swaps it in only
/// when the unit of work succeeds, so failed operations leave no trace.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    state: Mutex<MemoryState>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    rows: BTreeMap<i32, Product>,
    last_id: i32,
}

impl MemoryState {
    fn filtered(&self, status: ProductStatus) -> Vec<Product> {
        self.rows
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }
}

impl ProductRepository for MemoryState {
    fn save(&mut self, draft: ProductDraft) -> Result<Product, DomainError> {
        match draft.id {
            None => {
                self.last_id += 1;
                let product = Product {
                    id: self.last_id,
                    name: draft.name,
                    price: draft.price,
                    creation_date: draft.creation_date,
                    status: ProductStatus::Active,
                };
                self.rows.insert(product.id, product.clone());
                Ok(product)
            }
            Some(id) => {
                let row = self.rows.get_mut(&id).ok_or(DomainError::NotFound)?;
                row.name = draft.name;
                row.price = draft.price;
                row.creation_date = draft.creation_date;
                Ok(row.clone())
            }
        }
    }

    fn find_active_by_id(&mut self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.rows.get(&id).filter(|p| !p.is_deleted()).cloned())
    }

    fn list_active(&mut self) -> Result<Vec<Product>, DomainError> {
        Ok(self.filtered(ProductStatus::Active))
    }

    fn list_deleted(&mut self) -> Result<Vec<Product>, DomainError> {
        Ok(self.filtered(ProductStatus::Deleted))
    }

    fn soft_delete(&mut self, id: i32) -> Result<(), DomainError> {
        if let Some(row) = self.rows.get_mut(&id) {
            row.mark_deleted();
        }
        Ok(())
    }
}

impl ProductStore for InMemoryProductStore {
    fn transaction<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn ProductRepository) -> Result<T, DomainError>,
    {
        let mut state = self
            .state
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("product store poisoned: {}", e)))?;

        let mut working = state.clone();
        let value = f(&mut working)?;
        *state = working;
        Ok(value)
    }
}
