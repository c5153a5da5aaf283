//! # Order Flow
//!
//! One order moves `Browsing → Checkout → PaymentSelection → Tracking`, never backwards.
//! Each step hands an immutable payload to the next:
//!
//! | Transition | Payload |
//! |------------|---------|
//! | [`begin_checkout`](OrderFlow::begin_checkout) | [`OrderDraft`]: cart lines and totals, frozen |
//! | [`proceed_to_payment`](OrderFlow::proceed_to_payment) | the same draft |
//! | [`confirm_payment`](OrderFlow::confirm_payment) | [`ConfirmedOrder`]: draft plus payment method |
//!
//! A call from the wrong stage returns [`FlowError::InvalidTransition`] and changes nothing.
//! [`OrderFlow`] is plain synchronous state; [`OrderSession`] drives it together with the cart
//! actor and the rider tracker.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;

use crate::model::{Cart, CartLine, PaymentMethod, PaymentSelection, RestaurantId};
use crate::pricing::{compute_totals, OrderTotals, TaxRate};
use std::sync::Arc;
use tracing::info;

/// Where an order currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Browsing,
    Checkout,
    PaymentSelection,
    Tracking,
}

/// The cart as it was when checkout began, with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    restaurant_id: RestaurantId,
    lines: Vec<CartLine>,
    totals: OrderTotals,
    tax_rate: TaxRate,
}

impl OrderDraft {
    fn from_cart(cart: &Cart, tax_rate: TaxRate) -> Self {
        Self {
            restaurant_id: cart.restaurant_id,
            lines: cart.lines().to_vec(),
            totals: compute_totals(cart, tax_rate),
            tax_rate,
        }
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Exact totals; round with [`OrderTotals::rounded`] for display.
    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }
}

/// A paid (or cash-on-delivery) order on its way.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedOrder {
    draft: Arc<OrderDraft>,
    method: PaymentMethod,
}

impl ConfirmedOrder {
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }
}

#[derive(Debug, Clone)]
enum State {
    Browsing,
    Checkout(Arc<OrderDraft>),
    PaymentSelection(Arc<OrderDraft>),
    Tracking(Arc<ConfirmedOrder>),
}

/// The stage machine of one order at one restaurant.
#[derive(Debug, Clone)]
pub struct OrderFlow {
    restaurant_id: RestaurantId,
    state: State,
}

impl OrderFlow {
    /// A new order, browsing `restaurant_id`.
    pub fn new(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            state: State::Browsing,
        }
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn stage(&self) -> FlowStage {
        match self.state {
            State::Browsing => FlowStage::Browsing,
            State::Checkout(_) => FlowStage::Checkout,
            State::PaymentSelection(_) => FlowStage::PaymentSelection,
            State::Tracking(_) => FlowStage::Tracking,
        }
    }

    /// The frozen cart, from checkout onwards.
    pub fn draft(&self) -> Option<&Arc<OrderDraft>> {
        match &self.state {
            State::Checkout(draft) | State::PaymentSelection(draft) => Some(draft),
            State::Tracking(order) => Some(&order.draft),
            State::Browsing => None,
        }
    }

    pub fn confirmed(&self) -> Option<&Arc<ConfirmedOrder>> {
        match &self.state {
            State::Tracking(order) => Some(order),
            _ => None,
        }
    }

    /// Browsing → Checkout. Freezes `cart` and its totals.
    pub fn begin_checkout(
        &mut self,
        cart: &Cart,
        tax_rate: TaxRate,
    ) -> Result<Arc<OrderDraft>, FlowError> {
        self.expect(FlowStage::Browsing, "begin checkout")?;
        if cart.restaurant_id != self.restaurant_id {
            return Err(FlowError::WrongRestaurant {
                expected: self.restaurant_id,
                actual: cart.restaurant_id,
            });
        }
        if cart.is_empty() {
            return Err(FlowError::EmptyCart);
        }
        let draft = Arc::new(OrderDraft::from_cart(cart, tax_rate));
        info!(
            restaurant_id = %self.restaurant_id,
            lines = draft.lines.len(),
            grand_total = %draft.totals.grand_total,
            "Checkout started"
        );
        self.state = State::Checkout(draft.clone());
        Ok(draft)
    }

    /// Checkout → PaymentSelection.
    pub fn proceed_to_payment(&mut self) -> Result<Arc<OrderDraft>, FlowError> {
        let State::Checkout(draft) = &self.state else {
            return Err(self.invalid("proceed to payment"));
        };
        let draft = draft.clone();
        self.state = State::PaymentSelection(draft.clone());
        Ok(draft)
    }

    /// PaymentSelection → Tracking, if the selection validates. Invalid input keeps the
    /// flow on the payment step.
    pub fn confirm_payment(
        &mut self,
        selection: &PaymentSelection,
    ) -> Result<Arc<ConfirmedOrder>, FlowError> {
        let State::PaymentSelection(draft) = &self.state else {
            return Err(self.invalid("confirm payment"));
        };
        let method = selection.validate()?;
        let order = Arc::new(ConfirmedOrder {
            draft: draft.clone(),
            method,
        });
        info!(restaurant_id = %self.restaurant_id, %method, "Payment confirmed");
        self.state = State::Tracking(order.clone());
        Ok(order)
    }

    fn expect(&self, stage: FlowStage, attempted: &'static str) -> Result<(), FlowError> {
        if self.stage() != stage {
            return Err(self.invalid(attempted));
        }
        Ok(())
    }

    fn invalid(&self, attempted: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            from: self.stage(),
            attempted,
        }
    }
}
