//! Error types for the order flow.

use super::FlowStage;
use crate::cart_actor::CartError;
use crate::model::RestaurantId;
use thiserror::Error;

/// Rejected payment input. The flow stays on the payment step.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Invalid mobile wallet number")]
    InvalidWalletAccount,

    #[error("Invalid card number. It must be {expected} digits.")]
    InvalidCardNumber { expected: usize },
}

/// Errors raised while moving an order through its stages.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlowError {
    /// The transition is not allowed from the current stage. Nothing changed.
    #[error("cannot {attempted} while in {from:?}")]
    InvalidTransition {
        from: FlowStage,
        attempted: &'static str,
    },

    #[error("cannot check out an empty cart")]
    EmptyCart,

    #[error("cart belongs to {actual}, but the order is for {expected}")]
    WrongRestaurant {
        expected: RestaurantId,
        actual: RestaurantId,
    },

    /// The cart was already handed over to checkout or discarded.
    #[error("the cart is closed")]
    CartClosed,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Cart(#[from] CartError),
}
