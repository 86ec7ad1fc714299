use restaurant_orderservice::{
    context::{Context, RequireIdentity},
    domain::{Merchant, OrderState, OrderType},
    orders::{CreateCartItemDto, CreateOrderDto, CreateSelectedCartItemDto, OrderError, OrderService},
    repositories::memory::{
        FailurePoint, MemoryCartItemRepository, MemoryMerchantRepository, MemoryOrderRepository,
        MemorySelectedCartItemRepository, MemoryStore, SessionStats,
    },
};
use uuid::Uuid;

type MemoryOrderService = OrderService<
    MemoryOrderRepository,
    MemoryCartItemRepository,
    MemorySelectedCartItemRepository,
    MemoryMerchantRepository,
>;

fn service(store: &MemoryStore) -> MemoryOrderService {
    OrderService::new(
        store.order_repository(),
        store.cart_item_repository(),
        store.selected_cart_item_repository(),
        store.merchant_repository(),
        RequireIdentity,
    )
}

async fn store_with_merchant() -> (MemoryStore, Uuid) {
    let store = MemoryStore::new();
    let merchant_id = Uuid::new_v4();
    store
        .add_merchant(Merchant {
            id: merchant_id,
            name: "Mama's Kitchen".into(),
            email: "owner@mamas.example".into(),
            is_active: true,
        })
        .await;
    (store, merchant_id)
}

fn context() -> Context {
    Context::new("customer-7").with_role("customer")
}

fn selection(menu_id: Uuid, price: f64, quantity: i32) -> CreateSelectedCartItemDto {
    CreateSelectedCartItemDto {
        menu_id: menu_id.to_string(),
        price,
        quantity,
    }
}

fn cart_item(menu_id: Uuid, base_price: f64, selected_items: Vec<CreateSelectedCartItemDto>) -> CreateCartItemDto {
    CreateCartItemDto {
        menu_id: menu_id.to_string(),
        base_price,
        quantity: 1,
        selected_items,
    }
}

fn order(merchant_id: Uuid, cart_items: Vec<CreateCartItemDto>) -> CreateOrderDto {
    CreateOrderDto {
        state: Some(OrderState::Pending),
        order_type: Some(OrderType::Delivery),
        merchant_id: Some(merchant_id.to_string()),
        total: 31.5,
        cart_items,
    }
}

fn two_item_order(merchant_id: Uuid) -> CreateOrderDto {
    let burger = Uuid::new_v4();
    let salad = Uuid::new_v4();
    order(
        merchant_id,
        vec![
            cart_item(
                burger,
                12.0,
                vec![selection(burger, 1.5, 2), selection(burger, 2.0, 1)],
            ),
            cart_item(salad, 9.0, vec![selection(salad, 5.5, 1)]),
        ],
    )
}

async fn assert_nothing_stored(store: &MemoryStore) {
    assert!(store.orders().await.is_empty(), "no order may be visible");
    assert!(store.cart_items().await.is_empty(), "no cart item may be visible");
    assert!(
        store.selected_cart_items().await.is_empty(),
        "no selected item may be visible"
    );
}

#[tokio::test]
async fn creates_order_with_every_cart_item_and_selection() {
    let (store, merchant_id) = store_with_merchant().await;

    let response = service(&store)
        .create_order(&context(), two_item_order(merchant_id))
        .await
        .unwrap();

    let orders = store.orders().await;
    let cart_items = store.cart_items().await;
    let selected = store.selected_cart_items().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(cart_items.len(), 2);
    assert_eq!(selected.len(), 3);

    let order = &orders[0];
    assert_eq!(response.id, order.id);
    assert_eq!(response.merchant_id, merchant_id);
    assert_eq!(response.created_by, "customer-7");
    assert!(cart_items.iter().all(|item| item.order_id == order.id));

    // Every selection is owned by the cart item sharing its menu.
    for selection in &selected {
        let owner = cart_items
            .iter()
            .find(|item| item.id == selection.cart_item_id)
            .expect("selection must point at a stored cart item");
        assert_eq!(owner.menu_id, selection.menu_id);
    }

    let grouped: Vec<usize> = response
        .cart_items
        .iter()
        .map(|item| item.selected_items.len())
        .collect();
    assert_eq!(grouped, vec![2, 1]);
    assert_eq!(response.cart_items[0].selected_items[0].total, 3.0);

    assert_eq!(
        store.stats().await,
        SessionStats {
            started: 1,
            ended: 1,
            transactions: 1,
            commits: 1,
            aborts: 0,
        }
    );
}

#[tokio::test]
async fn unknown_merchant_never_opens_a_session() {
    let (store, _) = store_with_merchant().await;

    let err = service(&store)
        .create_order(&context(), two_item_order(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::NotFound("Merchant does not exist".into()));
    assert_nothing_stored(&store).await;
    assert_eq!(store.stats().await, SessionStats::default());
}

#[tokio::test]
async fn failed_selection_insert_rolls_back_order_and_cart_items() {
    let (store, merchant_id) = store_with_merchant().await;
    store.fail_on(FailurePoint::InsertSelectedCartItems).await;

    let err = service(&store)
        .create_order(&context(), two_item_order(merchant_id))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::Internal("Could not create an order".into()));
    assert_nothing_stored(&store).await;
    let stats = store.stats().await;
    assert_eq!(stats.commits, 0);
    assert_eq!(stats.aborts, 1);
    assert_eq!(stats.started, 1);
    assert_eq!(stats.ended, 1);
}

#[tokio::test]
async fn failed_cart_item_insert_rolls_back_the_order() {
    let (store, merchant_id) = store_with_merchant().await;
    store.fail_on(FailurePoint::InsertCartItems).await;

    let err = service(&store)
        .create_order(&context(), two_item_order(merchant_id))
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::Internal("Could not create an order".into()));
    assert_nothing_stored(&store).await;
    assert_eq!(store.stats().await.aborts, 1);
}

#[tokio::test]
async fn failed_commit_is_a_transaction_error() {
    let (store, merchant_id) = store_with_merchant().await;
    store.fail_on(FailurePoint::Commit).await;

    let err = service(&store)
        .create_order(&context(), two_item_order(merchant_id))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Transaction(_)));
    assert_nothing_stored(&store).await;
    let stats = store.stats().await;
    assert_eq!(stats.commits, 0);
    assert_eq!(stats.open_sessions(), 0);
}

#[tokio::test]
async fn session_is_released_exactly_once_on_every_path() {
    for point in [
        FailurePoint::StartTransaction,
        FailurePoint::CreateOrder,
        FailurePoint::InsertCartItems,
        FailurePoint::InsertSelectedCartItems,
        FailurePoint::Commit,
    ] {
        let (store, merchant_id) = store_with_merchant().await;
        store.fail_on(point).await;

        let result = service(&store)
            .create_order(&context(), two_item_order(merchant_id))
            .await;
        assert!(result.is_err(), "{point:?} should fail the order");

        let stats = store.stats().await;
        assert_eq!(stats.started, 1, "{point:?}");
        assert_eq!(stats.ended, 1, "{point:?}");
        assert!(stats.commits + stats.aborts <= 1, "{point:?} finished twice");
        assert_eq!(stats.commits, 0, "{point:?}");
        assert_nothing_stored(&store).await;
    }
}

#[tokio::test]
async fn unavailable_storage_is_an_internal_error() {
    let (store, merchant_id) = store_with_merchant().await;
    store.fail_on(FailurePoint::StartSession).await;

    let err = service(&store)
        .create_order(&context(), two_item_order(merchant_id))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Internal(_)));
    assert_eq!(store.stats().await, SessionStats::default());
}

#[tokio::test]
async fn empty_cart_creates_an_order_without_items() {
    let (store, merchant_id) = store_with_merchant().await;

    let response = service(&store)
        .create_order(&context(), order(merchant_id, vec![]))
        .await
        .unwrap();

    assert!(response.cart_items.is_empty());
    assert_eq!(store.orders().await.len(), 1);
    assert!(store.cart_items().await.is_empty());
    assert_eq!(store.stats().await.commits, 1);
}

#[tokio::test]
async fn cart_items_without_selections_skip_the_selection_insert() {
    let (store, merchant_id) = store_with_merchant().await;
    // Would fail if the selection insert ran.
    store.fail_on(FailurePoint::InsertSelectedCartItems).await;

    let response = service(&store)
        .create_order(
            &context(),
            order(merchant_id, vec![cart_item(Uuid::new_v4(), 4.0, vec![])]),
        )
        .await
        .unwrap();

    assert_eq!(response.cart_items.len(), 1);
    assert_eq!(store.cart_items().await.len(), 1);
}

#[tokio::test]
async fn selection_for_a_menu_outside_the_cart_is_rejected() {
    let (store, merchant_id) = store_with_merchant().await;
    let menu = Uuid::new_v4();
    let stray = Uuid::new_v4();

    let err = service(&store)
        .create_order(
            &context(),
            order(merchant_id, vec![cart_item(menu, 10.0, vec![selection(stray, 1.0, 1)])]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(message) if message.contains(&stray.to_string())));
    assert_nothing_stored(&store).await;
    let stats = store.stats().await;
    assert_eq!(stats.aborts, 1);
    assert_eq!(stats.open_sessions(), 0);
}

#[tokio::test]
async fn the_same_menu_twice_is_rejected_before_any_session() {
    let (store, merchant_id) = store_with_merchant().await;
    let burger = Uuid::new_v4();
    let mut repeated = cart_item(burger, 12.0, vec![selection(burger, 2.0, 1)]);
    // Same menu in another spelling.
    repeated.menu_id = burger.to_string().to_uppercase();

    let err = service(&store)
        .create_order(
            &context(),
            order(
                merchant_id,
                vec![cart_item(burger, 12.0, vec![selection(burger, 1.5, 1)]), repeated],
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::Validation(format!("Cart item for menu {burger} is submitted more than once"))
    );
    assert_eq!(store.stats().await, SessionStats::default());
    assert_nothing_stored(&store).await;
}

#[tokio::test]
async fn selection_menu_ids_match_regardless_of_formatting() {
    let (store, merchant_id) = store_with_merchant().await;
    let menu = Uuid::new_v4();
    let shouted = CreateSelectedCartItemDto {
        menu_id: format!("  {}  ", menu.to_string().to_uppercase()),
        price: 2.0,
        quantity: 1,
    };

    service(&store)
        .create_order(&context(), order(merchant_id, vec![cart_item(menu, 10.0, vec![shouted])]))
        .await
        .unwrap();

    let cart_items = store.cart_items().await;
    let selected = store.selected_cart_items().await;
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].cart_item_id, cart_items[0].id);
}

#[tokio::test]
async fn invalid_submissions_fail_before_any_session() {
    let (store, merchant_id) = store_with_merchant().await;
    let service = service(&store);

    let mut negative_total = order(merchant_id, vec![]);
    negative_total.total = -1.0;

    let mut missing_state = order(merchant_id, vec![]);
    missing_state.state = None;

    let mut missing_type = order(merchant_id, vec![]);
    missing_type.order_type = None;

    let mut missing_merchant = order(merchant_id, vec![]);
    missing_merchant.merchant_id = None;

    let mut malformed_merchant = order(merchant_id, vec![]);
    malformed_merchant.merchant_id = Some("not-a-uuid".into());

    let zero_quantity = order(
        merchant_id,
        vec![CreateCartItemDto {
            quantity: 0,
            ..cart_item(Uuid::new_v4(), 1.0, vec![])
        }],
    );

    for dto in [
        negative_total,
        missing_state,
        missing_type,
        missing_merchant,
        malformed_merchant,
        zero_quantity,
    ] {
        let err = service.create_order(&context(), dto).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)), "got {err:?}");
    }

    assert_eq!(store.stats().await, SessionStats::default());
    assert_nothing_stored(&store).await;
}

#[tokio::test]
async fn anonymous_callers_are_rejected() {
    let (store, merchant_id) = store_with_merchant().await;

    let err = service(&store)
        .create_order(&Context::new(""), two_item_order(merchant_id))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Unauthorized(_)));
    assert_eq!(store.stats().await, SessionStats::default());
}

#[tokio::test]
async fn concurrent_submissions_use_separate_sessions() {
    let (store, merchant_id) = store_with_merchant().await;
    let service = service(&store);
    let context = context();

    let (first, second) = tokio::join!(
        service.create_order(&context, two_item_order(merchant_id)),
        service.create_order(&context, two_item_order(merchant_id)),
    );

    assert_ne!(first.unwrap().id, second.unwrap().id);
    assert_eq!(store.orders().await.len(), 2);
    assert_eq!(store.cart_items().await.len(), 4);
    assert_eq!(store.selected_cart_items().await.len(), 6);
    let stats = store.stats().await;
    assert_eq!(stats.started, 2);
    assert_eq!(stats.ended, 2);
    assert_eq!(stats.commits, 2);
}
