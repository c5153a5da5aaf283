//! # Cart Actor
//!
//! Hosts every open [`Cart`]. A cart is opened when a restaurant's detail view is shown and
//! discarded when the user leaves it or checks out.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`], answered with a [`Cart`] snapshot
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = cart_actor::new(32);
//! let carts = CartClient::new(generic_client);
//! tokio::spawn(actor.run(()));
//!
//! let cart_id = carts.open(RestaurantId(1)).await?;
//! let cart = carts.add(cart_id, biryani).await?;
//! assert_eq!(cart.quantity_of(biryani_id), 1);
//! ```
//!
//! All edits to one cart go through the actor's queue, so two screens tapping "+" at the same
//! time cannot lose an update.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Cart;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
