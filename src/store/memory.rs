use super::{CatalogRepository, FavoritesRepository, StoreError};
use crate::model::{MenuItem, Restaurant, RestaurantId, UserId};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A store held in memory.
///
/// Catalog and favorites can be switched to failing independently, which is how tests
/// simulate a remote that drops requests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
    favorites: Mutex<HashMap<UserId, BTreeSet<RestaurantId>>>,
    catalog_down: AtomicBool,
    favorites_down: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.restaurants.push(restaurant);
        self
    }

    pub fn with_menu_item(mut self, item: MenuItem) -> Self {
        self.menu.push(item);
        self
    }

    pub fn with_favorite(self, user_id: &UserId, restaurant_id: RestaurantId) -> Self {
        self.rows()
            .entry(user_id.clone())
            .or_default()
            .insert(restaurant_id);
        self
    }

    /// Makes every catalog call fail until switched back.
    pub fn set_catalog_down(&self, down: bool) {
        self.catalog_down.store(down, Ordering::SeqCst);
    }

    /// Makes every favorites call fail until switched back.
    pub fn set_favorites_down(&self, down: bool) {
        self.favorites_down.store(down, Ordering::SeqCst);
    }

    /// Changes the remote behind the app's back, as another device would.
    pub fn remote_toggle(&self, user_id: &UserId, restaurant_id: RestaurantId) {
        let mut rows = self.rows();
        let set = rows.entry(user_id.clone()).or_default();
        if !set.remove(&restaurant_id) {
            set.insert(restaurant_id);
        }
    }

    fn rows(&self) -> MutexGuard<'_, HashMap<UserId, BTreeSet<RestaurantId>>> {
        self.favorites
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{what} is down")));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Self::check(&self.catalog_down, "catalog")?;
        Ok(self.restaurants.clone())
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, StoreError> {
        Self::check(&self.catalog_down, "catalog")?;
        Ok(self.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItem>, StoreError> {
        Self::check(&self.catalog_down, "catalog")?;
        Ok(self
            .menu
            .iter()
            .filter(|item| item.restaurant_id() == restaurant_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryStore {
    async fn list(&self, user_id: &UserId) -> Result<BTreeSet<RestaurantId>, StoreError> {
        Self::check(&self.favorites_down, "favorites")?;
        Ok(self.rows().get(user_id).cloned().unwrap_or_default())
    }

    async fn insert(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        Self::check(&self.favorites_down, "favorites")?;
        debug!(%user_id, %restaurant_id, "insert favorite");
        self.rows()
            .entry(user_id.clone())
            .or_default()
            .insert(restaurant_id);
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, restaurant_id: RestaurantId) -> Result<(), StoreError> {
        Self::check(&self.favorites_down, "favorites")?;
        debug!(%user_id, %restaurant_id, "delete favorite");
        if let Some(set) = self.rows().get_mut(user_id) {
            set.remove(&restaurant_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use crate::model::MenuItemId;

    #[tokio::test]
    async fn test_menu_is_filtered_by_restaurant() {
        let store = InMemoryStore::new()
            .with_restaurant(Restaurant::new(RestaurantId(1), "Tikka Point"))
            .with_menu_item(
                MenuItem::new(MenuItemId(1), RestaurantId(1), "Tikka", Decimal::new(600, 0)).unwrap(),
            )
            .with_menu_item(
                MenuItem::new(MenuItemId(2), RestaurantId(2), "Nihari", Decimal::new(800, 0)).unwrap(),
            );

        let menu = store.menu(RestaurantId(1)).await.unwrap();
        assert_eq!(menu.len(), 1);
        assert!(store.menu(RestaurantId(9)).await.unwrap().is_empty());
        assert!(store.restaurant(RestaurantId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let user = UserId::from("u1");
        let store = InMemoryStore::new().with_favorite(&user, RestaurantId(3));

        store.set_favorites_down(true);
        assert!(matches!(
            store.insert(&user, RestaurantId(4)).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.restaurants().await.is_ok());

        store.set_favorites_down(false);
        let listed = store.list(&user).await.unwrap();
        assert_eq!(listed.into_iter().collect::<Vec<_>>(), vec![RestaurantId(3)]);
    }
}
