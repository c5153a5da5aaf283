//! # Rider Tracking
//!
//! There is no live rider feed. Once payment is confirmed the rider is placed at the
//! restaurant and nudged north-east by a fixed step on every tick, which is enough to animate a
//! map marker.
//!
//! Positions go out on a `watch` channel, so a slow reader only ever sees the latest one. The
//! ticking task belongs to the [`RiderTracker`]: [`RiderTracker::stop`] cancels it and waits,
//! dropping the tracker aborts it. Nothing is published after either.

use crate::config::TrackingSettings;
use crate::model::{Coordinates, PaymentMethod};
use crate::order_flow::ConfirmedOrder;
use crate::pricing::format_amount;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// A synthetic rider moving away from the restaurant.
#[derive(Debug)]
pub struct RiderTracker {
    positions: watch::Receiver<Coordinates>,
    task: Option<JoinHandle<()>>,
}

impl RiderTracker {
    /// Starts ticking from `origin`, or from (0, 0) when the restaurant has no coordinates.
    pub fn start(origin: Option<Coordinates>, settings: TrackingSettings) -> Self {
        let origin = origin.unwrap_or_default();
        let (sender, positions) = watch::channel(origin);
        let task = tokio::spawn(async move {
            // The first tick is one full interval away; the origin is already published.
            let mut ticks = interval_at(Instant::now() + settings.interval, settings.interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let mut next = *sender.borrow();
                next.latitude += settings.step;
                next.longitude += settings.step;
                if sender.send(next).is_err() {
                    break;
                }
                debug!(latitude = next.latitude, longitude = next.longitude, "Rider moved");
            }
        });
        info!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            "Rider tracking started"
        );
        Self {
            positions,
            task: Some(task),
        }
    }

    /// Latest position.
    pub fn position(&self) -> Coordinates {
        *self.positions.borrow()
    }

    /// A receiver that sees every position from now on.
    pub fn subscribe(&self) -> watch::Receiver<Coordinates> {
        self.positions.clone()
    }

    /// Cancels the ticking task and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // A cancelled JoinError is the expected outcome.
            let _ = task.await;
        }
        info!("Rider tracking stopped");
    }
}

impl Drop for RiderTracker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Everything the tracking screen shows: the confirmed order and the moving rider.
#[derive(Debug)]
pub struct TrackingView {
    order: Arc<ConfirmedOrder>,
    rider: RiderTracker,
}

impl TrackingView {
    pub fn new(order: Arc<ConfirmedOrder>, rider: RiderTracker) -> Self {
        Self { order, rider }
    }

    pub fn order(&self) -> &ConfirmedOrder {
        &self.order
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.order.method()
    }

    /// `"PKR 1170.00"`
    pub fn total_label(&self, currency: &str) -> String {
        format_amount(currency, self.order.draft().totals().grand_total)
    }

    pub fn rider(&self) -> &RiderTracker {
        &self.rider
    }

    /// Tears the view down and stops the rider.
    pub async fn close(self) {
        self.rider.stop().await;
    }
}
