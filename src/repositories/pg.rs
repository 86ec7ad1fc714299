//! Postgres adapters built on diesel-async and a bb8 pool.

use diesel::{QueryDsl, SelectableHelper, result::Error as DieselError};
use diesel_async::{
    AsyncConnection, AsyncPgConnection, RunQueryDsl, TransactionManager,
    pooled_connection::bb8::PooledConnection,
};

use crate::{
    db::DbPool,
    domain::{CartItem, Merchant, Order, SelectedCartItem},
    models::{
        CartItemEntity, CreateCartItemEntity, CreateOrderEntity, CreateSelectedCartItemEntity,
        MerchantEntity, OrderEntity, SelectedCartItemEntity,
    },
    schema::{cart_items, merchants, orders, selected_cart_items},
};

use super::{
    CartItemRepository, MerchantRepository, OrderRepository, RepositoryError, SelectedCartItemRepository,
    Session,
    mappers::{CartItemMapper, MerchantMapper, OrderMapper, SelectedCartItemMapper},
};

type PgTransactionManager = <AsyncPgConnection as AsyncConnection>::TransactionManager;

/// One pooled connection held for the duration of a workflow.
///
/// Dropping it hands the connection back to the pool; a connection still
/// inside a transaction is discarded by the pool instead of reused.
pub struct PgSession {
    conn: PooledConnection<'static, AsyncPgConnection>,
}

impl PgSession {
    fn connection(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }
}

impl Session for PgSession {
    async fn start_transaction(&mut self) -> Result<(), RepositoryError> {
        PgTransactionManager::begin_transaction(self.connection()).await?;
        Ok(())
    }

    async fn commit_transaction(&mut self) -> Result<(), RepositoryError> {
        PgTransactionManager::commit_transaction(self.connection()).await?;
        Ok(())
    }

    async fn abort_transaction(&mut self) -> Result<(), RepositoryError> {
        PgTransactionManager::rollback_transaction(self.connection()).await?;
        Ok(())
    }

    async fn end_session(self) {
        drop(self.conn);
    }
}

/// All Postgres repositories over one shared pool.
#[derive(Clone)]
pub struct PgRepositories {
    pub orders: PgOrderRepository,
    pub cart_items: PgCartItemRepository,
    pub selected_cart_items: PgSelectedCartItemRepository,
    pub merchants: PgMerchantRepository,
}

impl PgRepositories {
    pub fn new(pool: DbPool) -> Self {
        Self {
            orders: PgOrderRepository { pool: pool.clone() },
            cart_items: PgCartItemRepository,
            selected_cart_items: PgSelectedCartItemRepository,
            merchants: PgMerchantRepository { pool },
        }
    }
}

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: DbPool,
}

impl OrderRepository for PgOrderRepository {
    type Session = PgSession;

    async fn start_session(&self) -> Result<PgSession, RepositoryError> {
        let conn = self
            .pool
            .get_owned()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(PgSession { conn })
    }

    async fn create_order(
        &self,
        session: &mut PgSession,
        model: CreateOrderEntity,
    ) -> Result<Order, RepositoryError> {
        let order: OrderEntity = diesel::insert_into(orders::table)
            .values(model)
            .returning(OrderEntity::as_returning())
            .get_result(session.connection())
            .await?;

        OrderMapper::to_domain(order)
    }
}

#[derive(Clone, Copy)]
pub struct PgCartItemRepository;

impl CartItemRepository<PgSession> for PgCartItemRepository {
    async fn insert_many(
        &self,
        session: &mut PgSession,
        models: Vec<CreateCartItemEntity>,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let rows: Vec<CartItemEntity> = diesel::insert_into(cart_items::table)
            .values(models)
            .returning(CartItemEntity::as_returning())
            .get_results(session.connection())
            .await?;

        Ok(rows.into_iter().map(CartItemMapper::to_domain).collect())
    }
}

#[derive(Clone, Copy)]
pub struct PgSelectedCartItemRepository;

impl SelectedCartItemRepository<PgSession> for PgSelectedCartItemRepository {
    async fn insert_many(
        &self,
        session: &mut PgSession,
        models: Vec<CreateSelectedCartItemEntity>,
    ) -> Result<Vec<SelectedCartItem>, RepositoryError> {
        let rows: Vec<SelectedCartItemEntity> = diesel::insert_into(selected_cart_items::table)
            .values(models)
            .returning(SelectedCartItemEntity::as_returning())
            .get_results(session.connection())
            .await?;

        Ok(rows.into_iter().map(SelectedCartItemMapper::to_domain).collect())
    }
}

#[derive(Clone)]
pub struct PgMerchantRepository {
    pool: DbPool,
}

impl MerchantRepository for PgMerchantRepository {
    async fn find_one(&self, id: uuid::Uuid) -> Result<Merchant, RepositoryError> {
        let conn = &mut self
            .pool
            .get()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let merchant = merchants::table
            .find(id)
            .select(MerchantEntity::as_select())
            .get_result(conn)
            .await;

        match merchant {
            Ok(merchant) => Ok(MerchantMapper::to_domain(merchant)),
            Err(DieselError::NotFound) => Err(RepositoryError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}
