use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::Context;

/// Who created or last touched a record, and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audit {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Audit {
    pub fn create_insert_context(context: &Context) -> Self {
        Self::insert_context_at(context, Utc::now())
    }

    pub fn insert_context_at(context: &Context, at: DateTime<Utc>) -> Self {
        Self {
            created_by: context.user_id.clone(),
            created_at: at,
            modified_by: None,
            modified_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_context_records_creator_only() {
        let at = Utc::now();
        let audit = Audit::insert_context_at(&Context::new("chef"), at);
        assert_eq!(audit.created_by, "chef");
        assert_eq!(audit.created_at, at);
        assert!(audit.modified_by.is_none());
        assert!(audit.modified_at.is_none());
    }
}
