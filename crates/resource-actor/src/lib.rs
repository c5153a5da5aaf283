//! # Resource Actor
//!
//! Serial, keyed state holders for the food-order client.
//!
//! Every piece of mutable client state (an open cart, a user's favorite set) lives inside a
//! [`ResourceActor`]. The actor owns a map of entities and drains one mpsc channel, so all
//! mutations of a given store happen one after another on a single task. Callers talk to it
//! through a cloneable [`ResourceClient`].
//!
//! ## Lifecycle of an entity
//!
//! - **Create** opens a new entity. The entity decides its own key via
//!   [`ActorEntity::assign_id`] (a sequence number for carts, the user id for favorite sets).
//!   Creating a key that is already open fails with [`FrameworkError::AlreadyExists`].
//! - **Get** returns a snapshot clone.
//! - **Action** runs a domain operation (`Add`, `Decrement`, `Toggle`, ...) and returns its result.
//! - **Delete** discards the entity after its `on_delete` hook ran.
//!
//! There is deliberately no generic "update": entities change only through their actions.
//!
//! ## Context injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor. The favorites actor
//! receives its repository and sync queue this way, the cart actor runs with `()`.
//!
//! ```rust,ignore
//! let (actor, client) = ResourceActor::<Cart>::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let cart_id = client.create(CartCreate { restaurant_id }).await?;
//! let snapshot = client.perform_action(cart_id, CartAction::Add(item)).await?;
//! ```
//!
//! ## Shutdown
//!
//! Dropping every client closes the channel; the run loop then logs its final size and returns.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so client wrappers can be
//! tested without spawning the real actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
