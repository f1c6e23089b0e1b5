use std::collections::BTreeMap;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::dto::products::ProductsQueryParams;
use crate::forms::product::{ProductForm, UpdateProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::query::{self, QueryOptions, ResultPage};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Any id that cannot name a stored product is reported as not found.
fn parse_id(id: &str) -> ServiceResult<ProductId> {
    ProductId::new(id).map_err(|_| ServiceError::NotFound)
}

/// Returns one filtered page of the catalog.
pub fn list_products<R>(repo: &R, params: &ProductsQueryParams) -> ServiceResult<ResultPage>
where
    R: ProductReader + ?Sized,
{
    let options = QueryOptions::from(params);
    let snapshot = repo.list_products().map_err(|err| {
        log::error!("Failed to list products: {err}");
        ServiceError::from(err)
    })?;

    Ok(query::query_products(&snapshot, &options))
}

/// Fetches a single product.
pub fn get_product<R>(repo: &R, id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let id = parse_id(id)?;
    repo.get_product_by_id(&id)?.ok_or(ServiceError::NotFound)
}

/// Validates the payload and appends a new product.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = NewProduct::try_from(form).map_err(|err| {
        log::warn!("Rejected product payload from {}: {err}", user.email);
        ServiceError::from(err)
    })?;

    let product = repo.create_product(&new_product).map_err(|err| {
        log::error!("Failed to create product: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Product {} created by {}", product.id, user.email);
    Ok(product)
}

/// Validates the payload and merges it into an existing product.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: &str,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let id = parse_id(id)?;
    let updates = UpdateProduct::try_from(form).map_err(|err| {
        log::warn!("Rejected product update from {}: {err}", user.email);
        ServiceError::from(err)
    })?;

    let product = repo.update_product(&id, &updates)?;

    log::info!("Product {} updated by {}", product.id, user.email);
    Ok(product)
}

/// Removes a product.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let id = parse_id(id)?;
    repo.delete_product(&id)?;

    log::info!("Product {id} deleted by {}", user.email);
    Ok(())
}

/// Counts products per stored category value.
pub fn product_stats<R>(repo: &R) -> ServiceResult<BTreeMap<String, usize>>
where
    R: ProductReader + ?Sized,
{
    let snapshot = repo.list_products()?;
    Ok(query::category_counts(&snapshot))
}
