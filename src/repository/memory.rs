//! In-process product store.
//!
//! Products live in a single ordered `Vec` behind an `RwLock`. Readers get a
//! cloned snapshot so the query engine never holds the lock while filtering.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ProductReader, ProductWriter};

#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `products` in the given order.
    pub fn with_products(products: Vec<Product>) -> RepositoryResult<Self> {
        {
            let mut seen = HashSet::new();
            for product in &products {
                if !seen.insert(product.id.as_str()) {
                    return Err(RepositoryError::ConstraintViolation(format!(
                        "Duplicate product id: {}",
                        product.id
                    )));
                }
            }
        }

        Ok(Self {
            products: Arc::new(RwLock::new(products)),
        })
    }

    /// Loads the initial collection from a JSON array of products.
    pub fn from_json_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded {} products from {}",
            products.len(),
            path.as_ref().display()
        );
        Self::with_products(products)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Vec<Product>>> {
        self.products
            .read()
            .map_err(|e| RepositoryError::Unexpected(format!("Store lock poisoned: {e}")))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Vec<Product>>> {
        self.products
            .write()
            .map_err(|e| RepositoryError::Unexpected(format!("Store lock poisoned: {e}")))
    }
}

impl ProductReader for InMemoryRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.read()?.clone())
    }

    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.read()?.iter().find(|p| &p.id == id).cloned())
    }
}

impl ProductWriter for InMemoryRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut products = self.write()?;

        let id = ProductId::generate();
        if products.iter().any(|p| p.id == id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Duplicate product id: {id}"
            )));
        }

        let product = new_product.clone().into_product(id);
        products.push(product.clone());
        Ok(product)
    }

    fn update_product(
        &self,
        id: &ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        let mut products = self.write()?;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        updates.apply_to(product);
        Ok(product.clone())
    }

    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        let mut products = self.write()?;
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        products.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct::new(
            name.to_string(),
            format!("{name} description"),
            10.0,
            category.to_string(),
            true,
        )
    }

    #[test]
    fn create_appends_in_insertion_order() {
        let repo = InMemoryRepository::new();
        let a = repo.create_product(&new_product("A", "X")).unwrap();
        let b = repo.create_product(&new_product("B", "Y")).unwrap();

        assert_ne!(a.id, b.id);
        let listed = repo.list_products().unwrap();
        assert_eq!(listed, vec![a.clone(), b]);
        assert_eq!(repo.get_product_by_id(&a.id).unwrap(), Some(a));
    }

    #[test]
    fn get_missing_returns_none() {
        let repo = InMemoryRepository::new();
        let id = ProductId::new("missing").unwrap();
        assert!(repo.get_product_by_id(&id).unwrap().is_none());
    }

    #[test]
    fn update_merges_fields_in_place() {
        let repo = InMemoryRepository::new();
        let created = repo.create_product(&new_product("A", "X")).unwrap();

        let updated = repo
            .update_product(
                &created.id,
                &UpdateProduct::new(Some("Renamed".into()), None, None, None, Some(false)),
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.category, "X");
        assert!(!updated.in_stock);
        assert_eq!(repo.list_products().unwrap(), vec![updated]);
    }

    #[test]
    fn update_and_delete_missing_report_not_found() {
        let repo = InMemoryRepository::new();
        let id = ProductId::new("nope").unwrap();

        assert!(matches!(
            repo.update_product(&id, &UpdateProduct::default()),
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repo.delete_product(&id),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn delete_preserves_order_of_remaining_items() {
        let repo = InMemoryRepository::new();
        let a = repo.create_product(&new_product("A", "X")).unwrap();
        let b = repo.create_product(&new_product("B", "X")).unwrap();
        let c = repo.create_product(&new_product("C", "X")).unwrap();

        repo.delete_product(&b.id).unwrap();

        assert_eq!(repo.list_products().unwrap(), vec![a, c]);
    }

    #[test]
    fn snapshots_are_detached_from_the_store() {
        let repo = InMemoryRepository::new();
        repo.create_product(&new_product("A", "X")).unwrap();

        let snapshot = repo.list_products().unwrap();
        repo.create_product(&new_product("B", "X")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(repo.list_products().unwrap().len(), 2);
    }

    #[test]
    fn clones_share_the_same_collection() {
        let repo = InMemoryRepository::new();
        let handle = repo.clone();
        handle.create_product(&new_product("A", "X")).unwrap();

        assert_eq!(repo.list_products().unwrap().len(), 1);
    }

    #[test]
    fn seeding_rejects_duplicate_ids() {
        let product = new_product("A", "X").into_product(ProductId::new("same").unwrap());
        let result = InMemoryRepository::with_products(vec![product.clone(), product]);

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn loads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "1", "name": "Widget", "description": "d", "price": 2.5, "category": "Tools", "inStock": true}},
                {{"id": "2", "name": "Gizmo", "price": 1, "category": "Toys"}}
            ]"#
        )
        .unwrap();

        let repo = InMemoryRepository::from_json_file(file.path()).unwrap();
        let products = repo.list_products().unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Widget");
        assert!(products[0].in_stock);
        assert_eq!(products[1].description, "");
        assert!(!products[1].in_stock);
    }

    #[test]
    fn malformed_seed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            InMemoryRepository::from_json_file(file.path()),
            Err(RepositoryError::SeedError(_))
        ));
    }
}
