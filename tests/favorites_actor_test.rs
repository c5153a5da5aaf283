use async_trait::async_trait;
use food_order::clients::FavoritesClient;
use food_order::favorites_actor::{FavoriteEvent, FavoritesContext, FavoritesError, FavoritesSync};
use food_order::model::{RestaurantId, UserId};
use food_order::store::{FavoritesRepository, StoreError};
use resource_actor::ActorClient;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Records every call and answers from a scripted remote set.
#[derive(Default)]
struct RecordingRepository {
    remote: Mutex<BTreeSet<RestaurantId>>,
    calls: Mutex<Vec<String>>,
    reject_writes: Mutex<bool>,
}

impl RecordingRepository {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FavoritesRepository for RecordingRepository {
    async fn list(&self, user_id: &UserId) -> Result<BTreeSet<RestaurantId>, StoreError> {
        self.calls.lock().unwrap().push(format!("list {user_id}"));
        Ok(self.remote.lock().unwrap().clone())
    }

    async fn insert(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("insert {user_id} {restaurant_id}"));
        if *self.reject_writes.lock().unwrap() {
            return Err(StoreError::Status {
                status: 409,
                body: "duplicate key".to_string(),
            });
        }
        self.remote.lock().unwrap().insert(restaurant_id);
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete {user_id} {restaurant_id}"));
        self.remote.lock().unwrap().remove(&restaurant_id);
        Ok(())
    }
}

/// Real Favorites actor and sync worker over a recording repository.
///
/// Pattern 2: Actor + Mocks
/// - Real Favorites actor (tests on_create and the two-phase toggle)
/// - Scripted repository (isolates the remote table)
#[tokio::test]
async fn test_favorites_actor_with_scripted_repository() {
    let repository = Arc::new(RecordingRepository::default());
    repository.remote.lock().unwrap().insert(RestaurantId(7));

    let (sync, worker) = FavoritesSync::new(repository.clone(), 8);
    let mut events = sync.subscribe();
    let (actor, generic_client) = food_order::favorites_actor::new(8);
    let worker_handle = tokio::spawn(worker.run());
    let actor_handle = tokio::spawn(actor.run(FavoritesContext {
        repository: repository.clone(),
        sync: sync.clone(),
    }));
    let favorites = FavoritesClient::new(generic_client);
    let user = UserId::from("u1");

    // Opening loads the remote set
    favorites.open(user.clone()).await.unwrap();
    let set = favorites.snapshot(user.clone()).await.unwrap().unwrap();
    assert!(set.contains(RestaurantId(7)));

    // Toggle off then on again: remote writes happen in the same order
    assert!(!favorites.toggle(user.clone(), RestaurantId(7)).await.unwrap());
    assert!(favorites.toggle(user.clone(), RestaurantId(7)).await.unwrap());
    for _ in 0..2 {
        assert!(matches!(events.recv().await.unwrap(), FavoriteEvent::Synced { .. }));
    }
    assert_eq!(
        repository.calls(),
        vec![
            "list u1".to_string(),
            "delete u1 restaurant_7".to_string(),
            "insert u1 restaurant_7".to_string(),
        ]
    );

    // A rejected write leaves the local set ahead until reload
    *repository.reject_writes.lock().unwrap() = true;
    assert!(favorites.toggle(user.clone(), RestaurantId(9)).await.unwrap());
    match events.recv().await.unwrap() {
        FavoriteEvent::SyncFailed { error, .. } => assert!(error.contains("409")),
        other => panic!("Expected SyncFailed, got {other:?}"),
    }
    let drift = favorites.reload(user.clone()).await.unwrap();
    assert_eq!(drift.removed, vec![RestaurantId(9)]);
    assert!(drift.added.is_empty());

    drop(favorites);
    drop(sync);
    actor_handle.await.unwrap();
    worker_handle.await.unwrap();
}

/// Toggling after the sync worker has stopped is refused and leaves the set unchanged.
#[tokio::test]
async fn test_toggle_without_worker_is_refused() {
    let repository = Arc::new(RecordingRepository::default());
    let (sync, worker) = FavoritesSync::new(repository.clone(), 8);
    drop(worker);

    let (actor, generic_client) = food_order::favorites_actor::new(8);
    let actor_handle = tokio::spawn(actor.run(FavoritesContext {
        repository,
        sync,
    }));
    let favorites = FavoritesClient::new(generic_client);
    let user = UserId::from("u2");

    favorites.open(user.clone()).await.unwrap();
    assert_eq!(
        favorites.toggle(user.clone(), RestaurantId(1)).await,
        Err(FavoritesError::SyncStopped)
    );
    let set = favorites.snapshot(user).await.unwrap().unwrap();
    assert!(set.is_empty());

    drop(favorites);
    actor_handle.await.unwrap();
}
