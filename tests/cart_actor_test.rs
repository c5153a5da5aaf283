use food_order::cart_actor::CartError;
use food_order::clients::CartClient;
use food_order::model::{MenuItem, MenuItemId, RestaurantId};
use food_order::pricing::{compute_totals, TaxRate};
use resource_actor::ActorClient;
use rust_decimal::Decimal;

fn item(id: i64, price: i64) -> MenuItem {
    MenuItem::new(MenuItemId(id), RestaurantId(1), format!("Dish {id}"), Decimal::new(price, 0))
        .unwrap()
}

/// Real Cart actor driven through a long mixed sequence of edits.
///
/// Pattern 1: Actor only (the cart has no dependencies)
#[tokio::test]
async fn test_no_line_ever_reaches_zero() {
    let (actor, generic_client) = food_order::cart_actor::new(16);
    let handle = tokio::spawn(actor.run(()));
    let carts = CartClient::new(generic_client);
    let cart_id = carts.open(RestaurantId(1)).await.unwrap();

    let menu = [item(1, 120), item(2, 350), item(3, 75)];
    // Deterministic walk over add / increment / decrement
    let mut seed: u64 = 0x5eed;
    for _ in 0..200 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let dish = &menu[(seed >> 33) as usize % menu.len()];
        let cart = match (seed >> 40) % 3 {
            0 => carts.add(cart_id, dish.clone()).await.unwrap(),
            1 => match carts.increment(cart_id, dish.id()).await {
                Ok(cart) => cart,
                Err(CartError::UnknownItem(_)) => continue,
                Err(e) => panic!("increment failed: {e}"),
            },
            _ => carts.decrement(cart_id, dish.id()).await.unwrap(),
        };
        assert!(cart.lines().iter().all(|line| line.quantity() >= 1));
    }

    drop(carts);
    handle.await.unwrap();
}

/// Decrementing to zero and re-adding starts again from one, and the subtotal moves by the
/// item's price.
#[tokio::test]
async fn test_remove_then_re_add() {
    let (actor, generic_client) = food_order::cart_actor::new(16);
    let handle = tokio::spawn(actor.run(()));
    let carts = CartClient::new(generic_client);
    let cart_id = carts.open(RestaurantId(1)).await.unwrap();
    let biryani = item(4, 500);

    carts.add(cart_id, biryani.clone()).await.unwrap();
    let empty = carts.decrement(cart_id, biryani.id()).await.unwrap();
    assert!(empty.is_empty());
    let before = compute_totals(&empty, TaxRate::default()).subtotal;

    let cart = carts.add(cart_id, biryani.clone()).await.unwrap();
    assert_eq!(cart.quantity_of(biryani.id()), 1);
    assert_eq!(
        compute_totals(&cart, TaxRate::default()).subtotal - before,
        biryani.price()
    );

    // Foreign items are refused and the cart is unchanged
    let foreign =
        MenuItem::new(MenuItemId(5), RestaurantId(2), "Nihari", Decimal::new(700, 0)).unwrap();
    assert!(matches!(
        carts.add(cart_id, foreign).await,
        Err(CartError::ForeignItem { .. })
    ));
    assert_eq!(carts.snapshot(cart_id).await.unwrap(), Some(cart));

    carts.discard(cart_id).await.unwrap();
    assert_eq!(carts.snapshot(cart_id).await, Ok(None));

    drop(carts);
    handle.await.unwrap();
}
