use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::check_price;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a product.
pub struct ProductForm {
    /// Display name, also the target of `search`.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub in_stock: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload for updating a product. Absent fields keep their stored value.
pub struct UpdateProductForm {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Strips every tag from free text, dropping `<script>` and `<style>` bodies.
///
/// The result is stored and returned as plain text, so the entities the HTML
/// serializer emits are decoded again. `&amp;` must be decoded last.
fn strip_markup(value: &str) -> String {
    let cleaned = ammonia::Builder::empty().clean(value.trim()).to_string();

    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Trims `value` and rejects it when blank. No other rewriting.
fn required_text(value: &str, err: FormError) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = required_text(&form.name, FormError::InvalidName)?;
        let category = required_text(&form.category, FormError::InvalidCategory)?;
        let price = check_price(form.price).map_err(|_| FormError::InvalidPrice)?;

        Ok(NewProduct::new(
            name,
            strip_markup(&form.description),
            price,
            category,
            form.in_stock,
        ))
    }
}

impl TryFrom<UpdateProductForm> for UpdateProduct {
    type Error = FormError;

    fn try_from(form: UpdateProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = form
            .name
            .as_deref()
            .map(|name| required_text(name, FormError::InvalidName))
            .transpose()?;
        let category = form
            .category
            .as_deref()
            .map(|category| required_text(category, FormError::InvalidCategory))
            .transpose()?;
        let price = form
            .price
            .map(|price| check_price(price).map_err(|_| FormError::InvalidPrice))
            .transpose()?;

        let updates = UpdateProduct::new(
            name,
            form.description.as_deref().map(strip_markup),
            price,
            category,
            form.in_stock,
        );

        if updates.is_empty() {
            return Err(FormError::EmptyUpdate);
        }

        Ok(updates)
    }
}
