//! Menu items as fetched from the `menu` collection.
//!
//! A [`MenuItem`] is immutable once built, and its price is always a positive decimal.
//! Rows coming off the wire go through the same check via `serde(try_from)`.
use crate::model::RestaurantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub i64);

impl From<i64> for MenuItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Rejected menu rows.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuItemError {
    #[error("price of {id} must be positive, got {price}")]
    NonPositivePrice { id: MenuItemId, price: Decimal },

    #[error("menu item {0} has no name")]
    MissingName(MenuItemId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MenuItemRow")]
pub struct MenuItem {
    id: MenuItemId,
    restaurant_id: RestaurantId,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
}

/// Wire shape of a `menu` row before validation.
#[derive(Debug, Deserialize)]
struct MenuItemRow {
    id: MenuItemId,
    restaurant_id: RestaurantId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: Decimal,
    #[serde(default)]
    image_url: Option<String>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = MenuItemError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let mut item = MenuItem::new(row.id, row.restaurant_id, row.name, row.price)?;
        item.description = row.description.unwrap_or_default();
        item.image_url = row.image_url;
        Ok(item)
    }
}

impl MenuItem {
    /// Builds a menu item, rejecting a blank name or a price that is zero or negative.
    pub fn new(
        id: MenuItemId,
        restaurant_id: RestaurantId,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, MenuItemError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MenuItemError::MissingName(id));
        }
        if price <= Decimal::ZERO {
            return Err(MenuItemError::NonPositivePrice { id, price });
        }
        Ok(Self {
            id,
            restaurant_id,
            name,
            description: String::new(),
            price,
            image_url: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price in the menu's currency.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}
