//! Walks one order end to end: sign in, browse, favorite, fill a cart, check out, pay and
//! watch the rider for a tick.
//!
//! Runs against an in-memory catalog unless `FOOD_DATA_URL` and `FOOD_DATA_KEY` are set, in
//! which case it signs in with `FOOD_DEMO_EMAIL` / `FOOD_DEMO_PASSWORD` and uses the remote.

use anyhow::{anyhow, Context};
use food_order::auth::{AuthService, Credentials, InMemoryAuth, RestAuth, Session};
use food_order::browse::Loadable;
use food_order::config::AppConfig;
use food_order::favorites_actor::FavoriteEvent;
use food_order::lifecycle::{setup_tracing, FoodOrderSystem};
use food_order::location::{delivery_label, FixedLocator, Locality};
use food_order::model::{Coordinates, MenuItem, MenuItemId, PaymentSelection, Restaurant, RestaurantId, User};
use food_order::store::{CatalogRepository, FavoritesRepository, InMemoryStore, RestStore};
use rust_decimal::Decimal;
use std::env;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

type Stores = (Arc<dyn CatalogRepository>, Arc<dyn FavoritesRepository>);

fn demo_store() -> anyhow::Result<InMemoryStore> {
    let karahi = RestaurantId(1);
    let savour = RestaurantId(2);
    Ok(InMemoryStore::new()
        .with_restaurant(
            Restaurant::new(karahi, "Butt Karahi")
                .with_location("Lakshmi Chowk, Lahore")
                .with_rating(4.6)
                .with_coordinates(Coordinates::new(31.5728, 74.3188)),
        )
        .with_restaurant(Restaurant::new(savour, "Savour Foods").with_location("Blue Area, Islamabad"))
        .with_menu_item(
            MenuItem::new(MenuItemId(1), karahi, "Chicken Karahi", Decimal::new(1800, 0))?
                .with_description("Half kg, cooked in desi ghee"),
        )
        .with_menu_item(MenuItem::new(MenuItemId(2), karahi, "Roghni Naan", Decimal::new(60, 0))?)
        .with_menu_item(MenuItem::new(MenuItemId(3), savour, "Pulao Kabab", Decimal::new(650, 0))?))
}

async fn sign_in(config: &AppConfig) -> anyhow::Result<(Box<dyn AuthService>, Session, Stores)> {
    match &config.remote {
        Some(remote) => {
            let auth = RestAuth::new(remote)?;
            let email = env::var("FOOD_DEMO_EMAIL").context("FOOD_DEMO_EMAIL is required with a remote store")?;
            let password =
                env::var("FOOD_DEMO_PASSWORD").context("FOOD_DEMO_PASSWORD is required with a remote store")?;
            let session = auth.sign_in(&Credentials::new(email, password)?).await?;
            let store = Arc::new(RestStore::new(remote)?.with_access_token(session.access_token()));
            let stores: Stores = (store.clone(), store);
            let auth: Box<dyn AuthService> = Box::new(auth);
            Ok((auth, session, stores))
        }
        None => {
            let auth = InMemoryAuth::new().with_account(User::new("demo-user", "demo@food.pk"), "demo");
            let session = auth.sign_in(&Credentials::new("demo@food.pk", "demo")?).await?;
            let store = Arc::new(demo_store()?);
            let stores: Stores = (store.clone(), store);
            let auth: Box<dyn AuthService> = Box::new(auth);
            Ok((auth, session, stores))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = AppConfig::load()?;
    let currency = config.currency.clone();
    let (auth, session, (catalog, favorites)) = sign_in(&config).await?;
    info!(user_id = %session.user_id(), "Starting food order demo");

    let locator = FixedLocator::new(
        Coordinates::new(31.5204, 74.3587),
        Some(Locality::new("Lahore", "Pakistan")),
    );
    match delivery_label(&locator).await {
        Ok(Some(label)) => info!(%label, "Delivering to"),
        Ok(None) => info!("Delivering to an unknown address"),
        Err(e) => warn!(error = %e, "Location unavailable"),
    }

    let system = FoodOrderSystem::new(config, catalog, favorites);
    let mut events = system.favorite_events();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                FavoriteEvent::Synced { restaurant_id, favorited, .. } => {
                    info!(%restaurant_id, favorited, "Favorite saved")
                }
                FavoriteEvent::SyncFailed { restaurant_id, error, .. } => {
                    warn!(%restaurant_id, %error, "Favorite not saved")
                }
                FavoriteEvent::Reconciled { drift, .. } => {
                    info!(added = drift.added.len(), removed = drift.removed.len(), "Favorites reloaded")
                }
            }
        }
    });

    let browser = system.browser();
    let home = browser.home(&session).await?;
    let first = home.first().ok_or_else(|| anyhow!("catalog is empty"))?;
    let favorited = browser.toggle_favorite(&session, first.restaurant.id).await?;
    info!(restaurant = %first.restaurant.name, favorited, "Toggled favorite");

    let Loadable::Ready { restaurant, menu } = browser.details(first.restaurant.id).await? else {
        return Err(anyhow!("{} disappeared", first.restaurant.id));
    };

    let span = tracing::info_span!("order", restaurant = %restaurant.name);
    let view = async {
        let mut order = system.start_order(restaurant).await?;
        for item in menu.iter().take(2) {
            order.add(item.clone()).await?;
        }
        if let Some(item) = menu.first() {
            order.increment(item.id()).await?;
        }
        let running = order.totals().await?.rounded();
        info!(subtotal = %running.subtotal, tax = %running.tax, total = %running.grand_total, "Cart ready");

        order.checkout().await?;
        order.proceed_to_payment()?;
        let view = order.confirm_payment(&PaymentSelection::CashOnDelivery)?;
        anyhow::Ok(view)
    }
    .instrument(span)
    .await?;

    info!(
        method = %view.payment_method(),
        total = %view.total_label(&currency),
        "Order placed"
    );
    let mut rider = view.rider().subscribe();
    if rider.changed().await.is_ok() {
        let at = *rider.borrow();
        info!(latitude = at.latitude, longitude = at.longitude, "Rider moved");
    }
    view.close().await;

    browser.refresh_favorites(&session).await?;
    drop(browser);
    system.sign_out(auth.as_ref(), &session).await?;
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    event_log.await?;

    info!("Application completed successfully");
    Ok(())
}
