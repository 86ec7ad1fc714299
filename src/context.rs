//! Caller identity as seen by the order workflow.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::orders::error::OrderError;

/// Identity of whoever is calling into the service. Populated by
/// [`crate::middleware::actor_context`] from gateway headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Context {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            role: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Decides whether a caller may submit orders at all. Runs before any lookup.
pub trait ContextValidator: Send + Sync {
    fn validate_context(&self, context: &Context) -> impl Future<Output = Result<(), OrderError>> + Send;
}

/// Accepts any caller carrying a non-blank identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireIdentity;

impl ContextValidator for RequireIdentity {
    async fn validate_context(&self, context: &Context) -> Result<(), OrderError> {
        if context.user_id.trim().is_empty() {
            return Err(OrderError::Unauthorized("Missing caller identity".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_identity_is_rejected() {
        let result = RequireIdentity.validate_context(&Context::new("  ")).await;
        assert!(matches!(result, Err(OrderError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn named_identity_is_accepted() {
        let context = Context::new("user-1").with_role("customer");
        assert!(RequireIdentity.validate_context(&context).await.is_ok());
    }
}
