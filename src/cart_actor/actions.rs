//! Custom actions for the Cart actor.
//!
//! Every action returns the cart as it stands afterwards, so callers never have to follow a
//! mutation with a separate read.

use crate::model::{MenuItem, MenuItemId};

/// Edits applied to an open cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// One more unit of the item, opening a line for it if needed.
    Add(MenuItem),
    /// One more unit of an item already in the cart.
    ///
    /// # Errors
    /// Fails with [`CartError::UnknownItem`](super::CartError::UnknownItem) when there is no line
    /// for the item.
    Increment(MenuItemId),
    /// One unit less; the line goes away at zero. Unknown items are ignored.
    Decrement(MenuItemId),
}
