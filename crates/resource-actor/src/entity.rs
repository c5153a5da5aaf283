//! # ActorEntity Trait
//!
//! The contract a piece of client state implements to be hosted by a
//! [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types keep every request typed: a cart only accepts `CartCreate` and `CartAction`,
//! a favorite set only `FavoritesOpen` and `FavoriteAction`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be managed by a `ResourceActor`.
///
/// # Keys
/// The actor keeps a running sequence number and offers it to [`ActorEntity::assign_id`]
/// together with the create payload. Entities with a natural key (a user id) ignore the
/// sequence; entities without one (a cart) wrap it.
///
/// # Hooks
/// `on_create` and `on_delete` default to doing nothing. `handle_action` is where the entity's
/// behaviour lives. All hooks receive the injected `Context`.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Key under which the entity is stored.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload needed to open a new entity.
    type Create: Send + Sync + Debug;

    /// Domain operations on an open entity.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()`. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The entity's error type. One enum per entity, shared by all its actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Chooses the key for a new entity.
    fn assign_id(sequence: u32, params: &Self::Create) -> Self::Id;

    /// Builds the entity from its key and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity becomes visible.
    /// An error here aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the entity is removed. An error here keeps it open.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a domain action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
