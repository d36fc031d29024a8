use chrono::NaiveDate;

/// Soft-delete status of a stored product. `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductStatus {
    #[default]
    Active,
    Deleted,
}

/// A product as held by storage.
///
/// `id` and `creation_date` are assigned once, by the lifecycle service and
/// the store, and are never taken from caller input.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub creation_date: NaiveDate,
    pub status: ProductStatus,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.status == ProductStatus::Deleted
    }

    pub fn mark_deleted(&mut self) {
        self.status = ProductStatus::Deleted;
    }
}

/// Caller-supplied product payload for create and update.
///
/// `id` and `creation_date` are carried only so the whole payload can be
/// inspected; the lifecycle service always discards them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCandidate {
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub creation_date: Option<NaiveDate>,
}

impl ProductCandidate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}

/// Write request handed to [`ProductRepository::save`].
///
/// `id: None` inserts a new row with a freshly generated id; `Some(id)`
/// overwrites name, price and creation date of the existing row.
///
/// [`ProductRepository::save`]: crate::domain::ports::ProductRepository::save
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub creation_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_deleted_is_one_way() {
        let mut product = Product {
            id: 1,
            name: "Widget".to_string(),
            price: 10.5,
            creation_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            status: ProductStatus::default(),
        };
        assert!(!product.is_deleted());

        product.mark_deleted();
        product.mark_deleted();

        assert!(product.is_deleted());
        assert_eq!(product.status, ProductStatus::Deleted);
    }

    #[test]
    fn candidate_new_leaves_identity_unset() {
        let candidate = ProductCandidate::new("Widget", 3.0);
        assert_eq!(candidate.id, None);
        assert_eq!(candidate.creation_date, None);
    }
}
