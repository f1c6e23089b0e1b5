use crate::{
    domain::{
        product::{NewProduct, Product, UpdateProduct},
        types::ProductId,
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::InMemoryRepository;

pub trait ProductReader {
    /// Snapshot of the whole collection in insertion order.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: &ProductId, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}
