use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::product::{Product, ProductStatus};
use crate::schema::products;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub creation_date: NaiveDate,
    pub deleted: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            creation_date: row.creation_date,
            status: if row.deleted {
                ProductStatus::Deleted
            } else {
                ProductStatus::Active
            },
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub name: &'a str,
    pub price: f64,
    pub creation_date: NaiveDate,
}

/// Columns an overwrite may touch. `deleted` only changes through soft delete.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset<'a> {
    pub name: &'a str,
    pub price: f64,
    pub creation_date: NaiveDate,
}
