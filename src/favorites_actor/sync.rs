//! # Favorites Sync Worker
//!
//! The second half of an optimistic toggle. The favorites actor changes its local set right
//! away and pushes a [`SyncJob`] here; the worker applies jobs to the remote table one at a
//! time, in the order they were queued, and reports each outcome as a [`FavoriteEvent`].
//!
//! Jobs for the same restaurant therefore never overtake each other: toggling on and then off
//! always reaches the remote as insert-then-delete.
//!
//! The worker stops once every [`FavoritesSync`] handle has been dropped and the queue is empty.

use crate::model::{FavoriteDrift, RestaurantId, UserId};
use crate::store::FavoritesRepository;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Outcome of background favorites work, for whoever wants to show it.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteEvent {
    /// The remote now agrees with a local toggle.
    Synced {
        user_id: UserId,
        restaurant_id: RestaurantId,
        favorited: bool,
    },
    /// The remote call failed; local state stays ahead of the remote until the next reload.
    SyncFailed {
        user_id: UserId,
        restaurant_id: RestaurantId,
        favorited: bool,
        error: String,
    },
    /// A reload replaced the local set with the remote one.
    Reconciled { user_id: UserId, drift: FavoriteDrift },
}

/// One unit of work for the worker.
#[derive(Debug)]
pub enum SyncJob {
    Insert {
        user_id: UserId,
        restaurant_id: RestaurantId,
    },
    Delete {
        user_id: UserId,
        restaurant_id: RestaurantId,
    },
    /// Answered once every job queued before it has been applied.
    Flush(oneshot::Sender<()>),
}

/// Sending side of the sync queue plus the event channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FavoritesSync {
    jobs: mpsc::Sender<SyncJob>,
    events: broadcast::Sender<FavoriteEvent>,
}

impl FavoritesSync {
    /// Creates the handle and the worker that serves it. Spawn [`SyncWorker::run`].
    pub fn new(repository: Arc<dyn FavoritesRepository>, buffer_size: usize) -> (Self, SyncWorker) {
        let (jobs, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let worker = SyncWorker {
            repository,
            receiver,
            events: events.clone(),
        };
        (Self { jobs, events }, worker)
    }

    /// Queues a job. Fails only when the worker has stopped.
    pub async fn enqueue(&self, job: SyncJob) -> Result<(), SyncJob> {
        self.jobs.send(job).await.map_err(|e| e.0)
    }

    /// Waits until everything queued so far has been applied. Returns `false` if the worker
    /// stopped first.
    pub async fn flush(&self) -> bool {
        let (done, finished) = oneshot::channel();
        if self.jobs.send(SyncJob::Flush(done)).await.is_err() {
            return false;
        }
        finished.await.is_ok()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FavoriteEvent> {
        self.events.subscribe()
    }

    pub(crate) fn publish(&self, event: FavoriteEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Applies queued favorite changes to the remote table.
pub struct SyncWorker {
    repository: Arc<dyn FavoritesRepository>,
    receiver: mpsc::Receiver<SyncJob>,
    events: broadcast::Sender<FavoriteEvent>,
}

impl SyncWorker {
    pub async fn run(mut self) {
        info!("Favorites sync worker started");
        while let Some(job) = self.receiver.recv().await {
            match job {
                SyncJob::Insert {
                    user_id,
                    restaurant_id,
                } => {
                    let result = self.repository.insert(&user_id, restaurant_id).await;
                    self.report(user_id, restaurant_id, true, result.map_err(|e| e.to_string()));
                }
                SyncJob::Delete {
                    user_id,
                    restaurant_id,
                } => {
                    let result = self.repository.delete(&user_id, restaurant_id).await;
                    self.report(user_id, restaurant_id, false, result.map_err(|e| e.to_string()));
                }
                SyncJob::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        info!("Favorites sync worker stopped");
    }

    fn report(
        &self,
        user_id: UserId,
        restaurant_id: RestaurantId,
        favorited: bool,
        result: Result<(), String>,
    ) {
        let event = match result {
            Ok(()) => {
                debug!(%user_id, %restaurant_id, favorited, "Favorite synced");
                FavoriteEvent::Synced {
                    user_id,
                    restaurant_id,
                    favorited,
                }
            }
            Err(error) => {
                warn!(%user_id, %restaurant_id, favorited, %error, "Favorite sync failed");
                FavoriteEvent::SyncFailed {
                    user_id,
                    restaurant_id,
                    favorited,
                    error,
                }
            }
        };
        let _ = self.events.send(event);
    }
}
