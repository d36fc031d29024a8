use chrono::{Local, NaiveDate};

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductStore;
use crate::domain::product::{Product, ProductCandidate, ProductDraft};
use crate::domain::validation::validate;

/// Product lifecycle: create, update of name and price, and one-way soft
/// delete.
///
/// Every operation runs as a single unit of work on the store. Existence is
/// always checked before the payload is validated, so a missing product is
/// reported as `NotFound` even when the payload is also invalid.
pub struct ProductService<S> {
    store: S,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, local_today)
    }

    pub fn with_clock(store: S, today: fn() -> NaiveDate) -> Self {
        Self { store, today }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.store.transaction(|repo| repo.list_active())
    }

    pub fn list_deleted_products(&self) -> Result<Vec<Product>, DomainError> {
        self.store.transaction(|repo| repo.list_deleted())
    }

    pub fn get_product(&self, id: i32) -> Result<Product, DomainError> {
        self.store
            .transaction(|repo| repo.find_active_by_id(id)?.ok_or(DomainError::NotFound))
    }

    /// Stores a new product. Any id or creation date on the candidate is
    /// discarded; the store assigns the id and the creation date is today.
    pub fn create_product(&self, candidate: ProductCandidate) -> Result<Product, DomainError> {
        if let Err(e) = validate(&candidate).into_result() {
            log::debug!("Rejected new product: {}", e);
            return Err(e);
        }

        let draft = ProductDraft {
            id: None,
            name: candidate.name,
            price: candidate.price,
            creation_date: (self.today)(),
        };
        let product = self.store.transaction(|repo| repo.save(draft))?;

        log::info!("Created product {} ({:?})", product.id, product.name);
        Ok(product)
    }

    /// Replaces name and price of an active product. Id and creation date
    /// always keep their stored values.
    pub fn update_product(
        &self,
        id: i32,
        candidate: ProductCandidate,
    ) -> Result<Product, DomainError> {
        let result = self.store.transaction(|repo| {
            let original = repo.find_active_by_id(id)?.ok_or(DomainError::NotFound)?;
            validate(&candidate).into_result()?;

            repo.save(ProductDraft {
                id: Some(id),
                name: candidate.name,
                price: candidate.price,
                creation_date: original.creation_date,
            })
        });

        match &result {
            Ok(product) => log::info!("Updated product {}", product.id),
            Err(e) => log::debug!("Update of product {} rejected: {}", id, e),
        }
        result
    }

    /// Soft-deletes an active product. The row stays in storage and moves to
    /// the deleted listing.
    pub fn delete_product(&self, id: i32) -> Result<(), DomainError> {
        let result = self.store.transaction(|repo| {
            let mut product = repo.find_active_by_id(id)?.ok_or(DomainError::NotFound)?;
            product.mark_deleted();
            repo.soft_delete(product.id)?;
            Ok(product)
        });

        match result {
            Ok(product) => {
                log::info!("Soft-deleted product {} ({:?})", product.id, product.status);
                Ok(())
            }
            Err(e) => {
                log::debug!("Delete of product {} rejected: {}", id, e);
                Err(e)
            }
        }
    }
}
