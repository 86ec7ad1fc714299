use std::collections::{HashMap, HashSet};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::{
    context::{Context, ContextValidator, RequireIdentity},
    domain::{
        Audit, CartItemFields, NewCartItem, NewOrder, SelectedCartItemDraft, SelectedCartItemFields,
    },
    repositories::{
        CartItemRepository, MerchantRepository, OrderRepository, RepositoryError, SelectedCartItemRepository,
        TransactionScope,
        mappers::{CartItemMapper, OrderMapper, SelectedCartItemMapper},
    },
};

use super::{
    dto::{CreateCartItemDto, CreateOrderDto, OrderResponseDto},
    error::OrderError,
    parser::create_order_response,
};

/// Object-safe entry point to the workflow, so HTTP handlers need not know
/// which repositories sit behind it.
pub trait OrderWorkflow: Send + Sync {
    fn create_order<'a>(
        &'a self,
        context: &'a Context,
        dto: CreateOrderDto,
    ) -> BoxFuture<'a, Result<OrderResponseDto, OrderError>>;
}

/// A cart item as submitted, with its selections still unowned.
struct SubmittedCartItem {
    fields: CartItemFields,
    selections: Vec<SelectedCartItemDraft>,
}

pub struct OrderService<O, C, S, M, V = RequireIdentity> {
    orders: O,
    cart_items: C,
    selected_cart_items: S,
    merchants: M,
    validator: V,
}

impl<O, C, S, M, V> OrderService<O, C, S, M, V>
where
    O: OrderRepository,
    C: CartItemRepository<O::Session>,
    S: SelectedCartItemRepository<O::Session>,
    M: MerchantRepository,
    V: ContextValidator,
{
    pub fn new(orders: O, cart_items: C, selected_cart_items: S, merchants: M, validator: V) -> Self {
        Self {
            orders,
            cart_items,
            selected_cart_items,
            merchants,
            validator,
        }
    }

    /// Turns a submitted cart into a stored order.
    ///
    /// Input is validated and the merchant looked up before any session is
    /// acquired. The order, its cart items and their selections are then
    /// written in one transaction that is committed only if every step
    /// succeeded.
    #[tracing::instrument(skip_all, fields(user_id = %context.user_id))]
    pub async fn create_order(
        &self,
        context: &Context,
        dto: CreateOrderDto,
    ) -> Result<OrderResponseDto, OrderError> {
        self.validator.validate_context(context).await?;

        let CreateOrderDto {
            state,
            order_type,
            merchant_id,
            total,
            cart_items,
        } = dto;

        let merchant_id = merchant_id
            .as_deref()
            .map(|id| self.orders.string_to_object_id(id))
            .transpose()?;
        let audit = Audit::create_insert_context(context);
        let order = NewOrder::create(state, order_type, total, merchant_id, audit.clone())?;
        let submitted = self.parse_cart_items(cart_items, &audit)?;

        match self.merchants.find_one(order.merchant_id).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => {
                tracing::warn!(merchant_id = %order.merchant_id, "Merchant does not exist");
                return Err(OrderError::NotFound("Merchant does not exist".into()));
            }
            Err(err) => return Err(err.into()),
        }

        let session = self.orders.start_session().await?;
        let mut scope = TransactionScope::begin(session).await?;
        let outcome = self.persist(scope.session(), order, submitted, &audit).await;
        let response = scope.finish(outcome).await?;

        tracing::info!(
            order_id = %response.id,
            cart_items = response.cart_items.len(),
            "Created order"
        );
        Ok(response)
    }

    fn parse_cart_items(
        &self,
        cart_items: Vec<CreateCartItemDto>,
        audit: &Audit,
    ) -> Result<Vec<SubmittedCartItem>, OrderError> {
        let mut menu_ids = HashSet::new();
        cart_items
            .into_iter()
            .map(|item| -> Result<SubmittedCartItem, OrderError> {
                let menu_id = self.orders.string_to_object_id(&item.menu_id)?;
                // Selections find their owner by menu, so each menu may own one cart item.
                if !menu_ids.insert(menu_id) {
                    return Err(OrderError::Validation(format!(
                        "Cart item for menu {} is submitted more than once",
                        self.orders.object_id_to_string(&menu_id)
                    )));
                }
                let fields = CartItemFields::new(menu_id, item.base_price, item.quantity)?;
                let selections = item
                    .selected_items
                    .into_iter()
                    .map(|selected| -> Result<SelectedCartItemDraft, OrderError> {
                        let fields = SelectedCartItemFields {
                            menu_id: self.orders.string_to_object_id(&selected.menu_id)?,
                            price: selected.price,
                            quantity: selected.quantity,
                        };
                        Ok(SelectedCartItemDraft::create(fields, audit.clone())?)
                    })
                    .collect::<Result<Vec<_>, OrderError>>()?;

                Ok(SubmittedCartItem { fields, selections })
            })
            .collect()
    }

    /// Everything written inside the transaction.
    async fn persist(
        &self,
        session: &mut O::Session,
        order: NewOrder,
        submitted: Vec<SubmittedCartItem>,
        audit: &Audit,
    ) -> Result<OrderResponseDto, OrderError> {
        let order = self
            .orders
            .create_order(session, OrderMapper::to_persistence(&order))
            .await
            .map_err(could_not_create)?;

        if submitted.is_empty() {
            return Ok(create_order_response(&order, &[], &[]));
        }

        let (fields, selections): (Vec<_>, Vec<_>) = submitted
            .into_iter()
            .map(|item| (item.fields, item.selections))
            .unzip();

        let cart_item_models = fields
            .into_iter()
            .map(|fields| CartItemMapper::to_persistence(&NewCartItem::create(fields, order.id, audit.clone())))
            .collect();
        let saved_items = self
            .cart_items
            .insert_many(session, cart_item_models)
            .await
            .map_err(could_not_create)?;

        // Keyed by the canonical string form so submitted and stored ids compare equal.
        let cart_item_ids: HashMap<String, Uuid> = saved_items
            .iter()
            .map(|item| (self.orders.object_id_to_string(&item.menu_id), item.id))
            .collect();

        let linked = selections
            .into_iter()
            .flatten()
            .map(|draft| {
                let menu_id = self.orders.object_id_to_string(&draft.menu_id());
                match cart_item_ids.get(&menu_id) {
                    Some(cart_item_id) => Ok(draft.link(*cart_item_id)),
                    None => Err(OrderError::Validation(format!(
                        "Selected item for menu {menu_id} does not match any cart item"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let saved_selections = if linked.is_empty() {
            Vec::new()
        } else {
            let models = linked.iter().map(SelectedCartItemMapper::to_persistence).collect();
            self.selected_cart_items
                .insert_many(session, models)
                .await
                .map_err(could_not_create)?
        };

        Ok(create_order_response(&order, &saved_items, &saved_selections))
    }
}

fn could_not_create(err: RepositoryError) -> OrderError {
    tracing::error!("Failed to persist order: {err}");
    OrderError::Internal("Could not create an order".into())
}

impl<O, C, S, M, V> OrderWorkflow for OrderService<O, C, S, M, V>
where
    O: OrderRepository,
    C: CartItemRepository<O::Session>,
    S: SelectedCartItemRepository<O::Session>,
    M: MerchantRepository,
    V: ContextValidator,
{
    fn create_order<'a>(
        &'a self,
        context: &'a Context,
        dto: CreateOrderDto,
    ) -> BoxFuture<'a, Result<OrderResponseDto, OrderError>> {
        Box::pin(OrderService::create_order(self, context, dto))
    }
}
