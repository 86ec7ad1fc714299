//! Persistence ports used by the order workflow, plus the adapters behind them.
//!
//! Every write of one submission goes through a single [`Session`], which the caller
//! owns for the whole workflow. [`TransactionScope`] is the only place that opens,
//! finishes and releases it.

pub mod mappers;
pub mod memory;
pub mod pg;

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{CartItem, Merchant, Order, SelectedCartItem},
    models::{CreateCartItemEntity, CreateOrderEntity, CreateSelectedCartItemEntity},
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Invalid id '{0}'")]
    InvalidId(String),

    #[error("Failed to obtain a DB connection: {0}")]
    Connection(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Stored record is malformed: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error("Storage failure: {0}")]
    Storage(String),
}

/// A transactional handle over one storage connection.
pub trait Session: Send {
    fn start_transaction(&mut self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn commit_transaction(&mut self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn abort_transaction(&mut self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Releases the underlying connection. Consumes the session.
    fn end_session(self) -> impl Future<Output = ()> + Send;
}

pub trait OrderRepository: Send + Sync {
    type Session: Session;

    fn start_session(&self) -> impl Future<Output = Result<Self::Session, RepositoryError>> + Send;

    fn create_order(
        &self,
        session: &mut Self::Session,
        model: CreateOrderEntity,
    ) -> impl Future<Output = Result<Order, RepositoryError>> + Send;

    /// Parses a submitted id. Accepts any case and surrounding whitespace.
    fn string_to_object_id(&self, value: &str) -> Result<Uuid, RepositoryError> {
        Uuid::parse_str(value.trim()).map_err(|_| RepositoryError::InvalidId(value.to_owned()))
    }

    /// Canonical (lowercase, hyphenated) form of a stored id.
    fn object_id_to_string(&self, id: &Uuid) -> String {
        id.hyphenated().to_string()
    }
}

/// Bulk insert of cart items; all rows or none.
pub trait CartItemRepository<S: Session>: Send + Sync {
    fn insert_many(
        &self,
        session: &mut S,
        models: Vec<CreateCartItemEntity>,
    ) -> impl Future<Output = Result<Vec<CartItem>, RepositoryError>> + Send;
}

/// Bulk insert of selected cart items; all rows or none.
pub trait SelectedCartItemRepository<S: Session>: Send + Sync {
    fn insert_many(
        &self,
        session: &mut S,
        models: Vec<CreateSelectedCartItemEntity>,
    ) -> impl Future<Output = Result<Vec<SelectedCartItem>, RepositoryError>> + Send;
}

pub trait MerchantRepository: Send + Sync {
    /// Fails with [`RepositoryError::NotFound`] when no merchant has this id.
    fn find_one(&self, id: Uuid) -> impl Future<Output = Result<Merchant, RepositoryError>> + Send;
}

/// Owns a session with an open transaction until [`TransactionScope::finish`].
///
/// `finish` commits only a successful outcome and aborts anything else, then
/// ends the session. Both steps consume the scope, so each runs at most once.
#[derive(Debug)]
pub struct TransactionScope<S: Session> {
    session: S,
}

impl<S: Session> TransactionScope<S> {
    pub async fn begin(mut session: S) -> Result<Self, RepositoryError> {
        if let Err(err) = session.start_transaction().await {
            session.end_session().await;
            return Err(RepositoryError::Transaction(format!(
                "Could not start transaction: {err}"
            )));
        }
        Ok(Self { session })
    }

    pub fn session(&mut self) -> &mut S {
        &mut self.session
    }

    pub async fn finish<T, E>(mut self, outcome: Result<T, E>) -> Result<T, E>
    where
        E: From<RepositoryError> + std::fmt::Display,
    {
        let outcome = match outcome {
            Ok(value) => match self.session.commit_transaction().await {
                Ok(()) => Ok(value),
                Err(err) => {
                    tracing::error!("Failed to commit transaction: {err}");
                    Err(E::from(RepositoryError::Transaction(format!(
                        "Could not commit transaction: {err}"
                    ))))
                }
            },
            Err(err) => {
                tracing::warn!("Aborting transaction: {err}");
                if let Err(abort_err) = self.session.abort_transaction().await {
                    tracing::error!("Failed to abort transaction: {abort_err}");
                }
                Err(err)
            }
        };

        self.session.end_session().await;
        outcome
    }
}
