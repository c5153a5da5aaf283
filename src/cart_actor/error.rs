//! Error types for the Cart actor.

use crate::model::{MenuItemId, RestaurantId};
use thiserror::Error;

/// Errors that can occur while editing a cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The item belongs to a different restaurant than the cart.
    #[error("{item} belongs to {restaurant}, not to this cart's restaurant")]
    ForeignItem {
        item: MenuItemId,
        restaurant: RestaurantId,
    },

    /// `increment` was called for an item that has no line in the cart.
    #[error("{0} is not in the cart")]
    UnknownItem(MenuItemId),

    #[error("quantity of {0} cannot grow any further")]
    QuantityOverflow(MenuItemId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
