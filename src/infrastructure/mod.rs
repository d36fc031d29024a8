pub mod memory_repo;
pub mod models;
pub mod product_repo;

pub use memory_repo::InMemoryProductStore;
pub use product_repo::DieselProductStore;
