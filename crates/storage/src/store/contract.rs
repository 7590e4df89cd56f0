#![forbid(unsafe_code)]

use crate::store::StoreError;
use crate::store::sessions::{SessionListener, SessionSubscription};
use ad_core::session::Session;

/// Wire representation of one stored record: a JSON object with snake_case
/// keys. Timestamps travel as integer milliseconds under `created_at` and
/// `updated_at`.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Equality filter on one of the promoted row fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFilter {
    pub field: &'static str,
    pub equals: String,
}

impl RowFilter {
    pub fn owner(user_id: &str) -> Self {
        Self {
            field: "user_id",
            equals: user_id.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowOrder {
    pub field: &'static str,
    pub ascending: bool,
}

impl RowOrder {
    /// Newest first. The default ordering every list screen relies on.
    pub fn created_desc() -> Self {
        Self {
            field: "created_at",
            ascending: false,
        }
    }
}

/// The remote table store plus its auth-session surface. One handle serves
/// the whole process; implementations synchronize internally.
pub trait RemoteStore: Send + Sync {
    fn query(
        &self,
        table: &str,
        filter: Option<&RowFilter>,
        order: RowOrder,
    ) -> Result<Vec<Row>, StoreError>;

    /// Stores a new row. The store assigns `id`, `created_at` and
    /// `updated_at`; any caller-supplied values for those keys are ignored.
    /// Returns the row as stored.
    fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError>;

    /// Merges `patch` into the row at `id` and bumps `updated_at` strictly.
    /// Returns the row as stored.
    fn update(&self, table: &str, id: &str, patch: Row) -> Result<Row, StoreError>;

    fn current_session(&self) -> Option<Session>;

    /// Registers `listener` for session transitions. Dropping the returned
    /// subscription unregisters it.
    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription;

    /// Invalidates the current session. Success is observed by subscribers
    /// as a transition to the signed-out state.
    fn sign_out(&self) -> Result<(), StoreError>;
}
