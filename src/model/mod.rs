//! Pure data structures. [`Cart`] and [`FavoriteSet`] implement
//! [`ActorEntity`](resource_actor::ActorEntity) in their actor modules.

pub mod cart;
pub mod favorites;
pub mod menu;
pub mod payment;
pub mod restaurant;
pub mod user;

pub use cart::*;
pub use favorites::*;
pub use menu::*;
pub use payment::*;
pub use restaurant::*;
pub use user::*;
