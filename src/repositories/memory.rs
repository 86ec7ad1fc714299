//! In-process repositories.
//!
//! Writes made through a [`MemorySession`] are staged and only become visible
//! to readers of the store on commit. The store also counts session and
//! transaction activity and can be told to fail at a chosen step, which is
//! what the workflow tests lean on.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    domain::{CartItem, Merchant, Order, SelectedCartItem},
    models::{
        CartItemEntity, CreateCartItemEntity, CreateOrderEntity, CreateSelectedCartItemEntity,
        OrderEntity, SelectedCartItemEntity,
    },
};

use super::{
    CartItemRepository, MerchantRepository, OrderRepository, RepositoryError, SelectedCartItemRepository,
    Session,
    mappers::{CartItemMapper, OrderMapper, SelectedCartItemMapper},
};

/// Step at which the store should report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    StartSession,
    StartTransaction,
    CreateOrder,
    InsertCartItems,
    InsertSelectedCartItems,
    Commit,
}

/// Counters of session and transaction activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub started: usize,
    pub ended: usize,
    pub transactions: usize,
    pub commits: usize,
    pub aborts: usize,
}

impl SessionStats {
    pub fn open_sessions(&self) -> usize {
        self.started.saturating_sub(self.ended)
    }
}

#[derive(Debug, Default, Clone)]
struct Tables {
    orders: Vec<Order>,
    cart_items: Vec<CartItem>,
    selected_cart_items: Vec<SelectedCartItem>,
}

impl Tables {
    fn absorb(&mut self, staged: Tables) {
        self.orders.extend(staged.orders);
        self.cart_items.extend(staged.cart_items);
        self.selected_cart_items.extend(staged.selected_cart_items);
    }
}

#[derive(Debug, Default)]
struct Shared {
    merchants: HashMap<Uuid, Merchant>,
    committed: Tables,
    stats: SessionStats,
    failure: Option<FailurePoint>,
}

impl Shared {
    fn check(&self, point: FailurePoint) -> Result<(), RepositoryError> {
        if self.failure == Some(point) {
            return Err(RepositoryError::Storage(format!("injected failure at {point:?}")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_merchant(&self, merchant: Merchant) {
        self.shared.lock().await.merchants.insert(merchant.id, merchant);
    }

    pub async fn fail_on(&self, point: FailurePoint) {
        self.shared.lock().await.failure = Some(point);
    }

    pub async fn stats(&self) -> SessionStats {
        self.shared.lock().await.stats
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.shared.lock().await.committed.orders.clone()
    }

    pub async fn cart_items(&self) -> Vec<CartItem> {
        self.shared.lock().await.committed.cart_items.clone()
    }

    pub async fn selected_cart_items(&self) -> Vec<SelectedCartItem> {
        self.shared.lock().await.committed.selected_cart_items.clone()
    }

    pub fn order_repository(&self) -> MemoryOrderRepository {
        MemoryOrderRepository {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn cart_item_repository(&self) -> MemoryCartItemRepository {
        MemoryCartItemRepository
    }

    pub fn selected_cart_item_repository(&self) -> MemorySelectedCartItemRepository {
        MemorySelectedCartItemRepository
    }

    pub fn merchant_repository(&self) -> MemoryMerchantRepository {
        MemoryMerchantRepository {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[derive(Debug)]
pub struct MemorySession {
    shared: Arc<Mutex<Shared>>,
    staged: Option<Tables>,
}

impl MemorySession {
    fn staged(&mut self) -> Result<&mut Tables, RepositoryError> {
        self.staged
            .as_mut()
            .ok_or_else(|| RepositoryError::Transaction("no transaction in progress".into()))
    }
}

impl Session for MemorySession {
    async fn start_transaction(&mut self) -> Result<(), RepositoryError> {
        let mut shared = self.shared.lock().await;
        shared.check(FailurePoint::StartTransaction)?;
        if self.staged.is_some() {
            return Err(RepositoryError::Transaction("transaction already started".into()));
        }
        shared.stats.transactions += 1;
        self.staged = Some(Tables::default());
        Ok(())
    }

    async fn commit_transaction(&mut self) -> Result<(), RepositoryError> {
        let mut shared = self.shared.lock().await;
        let staged = self
            .staged
            .take()
            .ok_or_else(|| RepositoryError::Transaction("no transaction in progress".into()))?;
        if let Err(err) = shared.check(FailurePoint::Commit) {
            // A failed commit leaves nothing behind.
            shared.stats.aborts += 1;
            return Err(err);
        }
        shared.committed.absorb(staged);
        shared.stats.commits += 1;
        Ok(())
    }

    async fn abort_transaction(&mut self) -> Result<(), RepositoryError> {
        let mut shared = self.shared.lock().await;
        if self.staged.take().is_none() {
            return Err(RepositoryError::Transaction("no transaction in progress".into()));
        }
        shared.stats.aborts += 1;
        Ok(())
    }

    async fn end_session(self) {
        let mut shared = self.shared.lock().await;
        if self.staged.is_some() {
            tracing::warn!("Session ended with an open transaction; discarding staged writes");
        }
        shared.stats.ended += 1;
    }
}

#[derive(Debug, Clone)]
pub struct MemoryOrderRepository {
    shared: Arc<Mutex<Shared>>,
}

impl OrderRepository for MemoryOrderRepository {
    type Session = MemorySession;

    async fn start_session(&self) -> Result<MemorySession, RepositoryError> {
        let mut shared = self.shared.lock().await;
        shared.check(FailurePoint::StartSession)?;
        shared.stats.started += 1;
        Ok(MemorySession {
            shared: Arc::clone(&self.shared),
            staged: None,
        })
    }

    async fn create_order(
        &self,
        session: &mut MemorySession,
        model: CreateOrderEntity,
    ) -> Result<Order, RepositoryError> {
        self.shared.lock().await.check(FailurePoint::CreateOrder)?;

        let order = OrderMapper::to_domain(OrderEntity {
            id: Uuid::new_v4(),
            state: model.state,
            order_type: model.order_type,
            total: model.total,
            merchant_id: model.merchant_id,
            created_by: model.created_by,
            created_at: model.created_at,
            modified_by: None,
            modified_at: None,
        })?;
        session.staged()?.orders.push(order.clone());
        Ok(order)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemoryCartItemRepository;

impl CartItemRepository<MemorySession> for MemoryCartItemRepository {
    async fn insert_many(
        &self,
        session: &mut MemorySession,
        models: Vec<CreateCartItemEntity>,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        session.shared.lock().await.check(FailurePoint::InsertCartItems)?;

        let items: Vec<CartItem> = models
            .into_iter()
            .map(|model| {
                CartItemMapper::to_domain(CartItemEntity {
                    id: Uuid::new_v4(),
                    order_id: model.order_id,
                    menu_id: model.menu_id,
                    base_price: model.base_price,
                    quantity: model.quantity,
                    created_by: model.created_by,
                    created_at: model.created_at,
                    modified_by: None,
                    modified_at: None,
                })
            })
            .collect();

        let staged = session.staged()?;
        if let Some(orphan) = items
            .iter()
            .find(|item| !staged.orders.iter().any(|order| order.id == item.order_id))
        {
            return Err(RepositoryError::Storage(format!(
                "cart item references unknown order {}",
                orphan.order_id
            )));
        }
        staged.cart_items.extend(items.iter().cloned());
        Ok(items)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemorySelectedCartItemRepository;

impl SelectedCartItemRepository<MemorySession> for MemorySelectedCartItemRepository {
    async fn insert_many(
        &self,
        session: &mut MemorySession,
        models: Vec<CreateSelectedCartItemEntity>,
    ) -> Result<Vec<SelectedCartItem>, RepositoryError> {
        session
            .shared
            .lock()
            .await
            .check(FailurePoint::InsertSelectedCartItems)?;

        let items: Vec<SelectedCartItem> = models
            .into_iter()
            .map(|model| {
                SelectedCartItemMapper::to_domain(SelectedCartItemEntity {
                    id: Uuid::new_v4(),
                    cart_item_id: model.cart_item_id,
                    menu_id: model.menu_id,
                    price: model.price,
                    quantity: model.quantity,
                    total: model.total,
                    created_by: model.created_by,
                    created_at: model.created_at,
                    modified_by: None,
                    modified_at: None,
                })
            })
            .collect();

        let staged = session.staged()?;
        if let Some(orphan) = items
            .iter()
            .find(|item| !staged.cart_items.iter().any(|owner| owner.id == item.cart_item_id))
        {
            return Err(RepositoryError::Storage(format!(
                "selected item references unknown cart item {}",
                orphan.cart_item_id
            )));
        }
        staged.selected_cart_items.extend(items.iter().cloned());
        Ok(items)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryMerchantRepository {
    shared: Arc<Mutex<Shared>>,
}

impl MerchantRepository for MemoryMerchantRepository {
    async fn find_one(&self, id: Uuid) -> Result<Merchant, RepositoryError> {
        self.shared
            .lock()
            .await
            .merchants
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}
