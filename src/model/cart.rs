//! The cart for the restaurant currently being viewed.
//!
//! # Invariants
//! - At most one [`CartLine`] per menu item id; lines keep the order items were first added.
//! - Every line has a quantity of at least 1. Decrementing a line to zero removes it.
//! - Every line belongs to the cart's restaurant.
//!
//! The mutators are plain synchronous reducers. The [`cart_actor`](crate::cart_actor) serializes
//! calls to them and hands out clones as snapshots.
use crate::cart_actor::CartError;
use crate::model::{MenuItem, MenuItemId, RestaurantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for open carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// One menu item and how many of it were ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    item: MenuItem,
    quantity: u32,
}

impl CartLine {
    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price × quantity`, unrounded.
    pub fn line_total(&self) -> Decimal {
        self.item.price() * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub restaurant_id: RestaurantId,
    lines: Vec<CartLine>,
}

/// Payload for opening a cart.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub restaurant_id: RestaurantId,
}

impl Cart {
    /// An empty cart for `restaurant_id`.
    pub fn new(id: CartId, restaurant_id: RestaurantId) -> Self {
        Self {
            id,
            restaurant_id,
            lines: Vec::new(),
        }
    }

    /// Adds one unit of `item`, opening a new line if the item is not in the cart yet.
    pub fn add(&mut self, item: MenuItem) -> Result<(), CartError> {
        if item.restaurant_id() != self.restaurant_id {
            return Err(CartError::ForeignItem {
                item: item.id(),
                restaurant: item.restaurant_id(),
            });
        }
        if self.position(item.id()).is_some() {
            return self.increment(item.id());
        }
        self.lines.push(CartLine { item, quantity: 1 });
        Ok(())
    }

    /// Adds one unit to an existing line.
    pub fn increment(&mut self, id: MenuItemId) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.item.id() == id)
            .ok_or(CartError::UnknownItem(id))?;
        line.quantity = line
            .quantity
            .checked_add(1)
            .ok_or(CartError::QuantityOverflow(id))?;
        Ok(())
    }

    /// Removes one unit; the line disappears when its quantity reaches zero.
    /// Unknown ids are ignored.
    pub fn decrement(&mut self, id: MenuItemId) {
        let Some(index) = self.position(id) else {
            return;
        };
        let remaining = self.lines.get(index).map_or(0, |line| line.quantity - 1);
        if remaining == 0 {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.quantity = remaining;
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity ordered of `id`, zero when absent.
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.position(id)
            .and_then(|index| self.lines.get(index))
            .map_or(0, CartLine::quantity)
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item.id() == id)
    }
}
