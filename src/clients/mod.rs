//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Both clients implement [`ActorClient`](resource_actor::ActorClient), which gives them
//! `snapshot` and `discard`.

pub mod cart_client;
pub mod favorites_client;

pub use cart_client::*;
pub use favorites_client::*;
