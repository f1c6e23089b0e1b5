use serde::{Deserialize, Serialize};

use crate::domain::types::ProductId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub in_stock: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        price: f64,
        category: String,
        in_stock: bool,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price,
            category: category.trim().to_string(),
            in_stock,
        }
    }

    /// Builds the stored product under the given identifier.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

/// Partial update; only the present fields are written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl UpdateProduct {
    #[must_use]
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price: Option<f64>,
        category: Option<String>,
        in_stock: Option<bool>,
    ) -> Self {
        Self {
            name: name.map(|s| s.trim().to_string()),
            description: description.map(|s| s.trim().to_string()),
            price,
            category: category.map(|s| s.trim().to_string()),
            in_stock,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.in_stock.is_none()
    }

    /// Merges the present fields into `product`. The identifier is never touched.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
    }
}
