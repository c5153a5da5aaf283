//! Runtime orchestration and lifecycle management.
//!
//! - [`FoodOrderSystem`] starts the actors and the favorites sync worker, wires their
//!   dependencies, and shuts them down in order.
//! - [`setup_tracing`] installs the log subscriber for binaries.

pub mod system;
pub mod tracing;

pub use system::*;
pub use tracing::*;
