#![forbid(unsafe_code)]

use crate::error::{AppError, DataError};
use crate::wire::WireError;
use ad_core::ids::UserId;
use ad_core::model::{EntityKind, Ticket, TicketStatus, ValidationError};
use ad_storage::{RemoteStore, Row, RowFilter, RowOrder};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Links a typed record to its remote table and wire mapping.
pub trait TableRecord: Sized + Clone {
    const KIND: EntityKind;
    type Draft: Clone;

    fn from_row(row: Row) -> Result<Self, WireError>;
    fn draft_to_row(draft: &Self::Draft, owner: &UserId) -> Row;
    fn validate(draft: &Self::Draft) -> Result<(), ValidationError>;
}

/// Draft type for record kinds with no create path. Uninhabited, so
/// `create` is impossible to call for them.
#[derive(Clone, Copy, Debug)]
pub enum NoDraft {}

/// Per-owner cache of one record collection. Each screen owns its caches,
/// so dropping the screen discards any result that was still in flight; a
/// completed fetch replaces the slot wholesale (the store returns full
/// snapshots, so the last response to land wins and no merge is needed).
pub struct ViewCache<T: TableRecord> {
    store: Arc<dyn RemoteStore>,
    slots: HashMap<UserId, Vec<T>>,
}

impl<T: TableRecord> ViewCache<T> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            slots: HashMap::new(),
        }
    }

    /// Last-known-good list for the owner; empty before the first
    /// successful fetch.
    pub fn current(&self, user: Option<&UserId>) -> &[T] {
        user.and_then(|user| self.slots.get(user))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Refreshes the owner's slot from the store, newest first. Without a
    /// signed-in user this returns an empty list and performs no store
    /// call. On failure the slot keeps its last-known-good list.
    pub fn fetch(&mut self, user: Option<&UserId>) -> Result<Vec<T>, AppError> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };
        let filter = RowFilter::owner(user.as_str());
        let rows = self
            .store
            .query(T::KIND.table(), Some(&filter), RowOrder::created_desc())
            .map_err(|err| AppError::FetchFailed(DataError::Store(err)))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(T::from_row(row).map_err(|err| {
                AppError::FetchFailed(DataError::Wire(err))
            })?);
        }
        self.slots.insert(user.clone(), records.clone());
        Ok(records)
    }

    /// Validates the draft, attaches the owner and inserts. On success the
    /// owner's slot is invalidated rather than spliced: the follow-up fetch
    /// costs one round trip and guarantees the list reflects the
    /// store-assigned fields. On failure the slot is left untouched so the
    /// form can offer a retry.
    pub fn create(&mut self, user: Option<&UserId>, draft: &T::Draft) -> Result<T, AppError> {
        let Some(user) = user else {
            debug_assert!(false, "create reached the cache without a session");
            return Err(AppError::Unauthenticated);
        };
        T::validate(draft)?;
        let row = T::draft_to_row(draft, user);
        let stored = self
            .store
            .insert(T::KIND.table(), row)
            .map_err(|err| AppError::CreateFailed(DataError::Store(err)))?;
        let record =
            T::from_row(stored).map_err(|err| AppError::CreateFailed(DataError::Wire(err)))?;
        self.slots.remove(user);
        Ok(record)
    }

    pub fn invalidate(&mut self, user: &UserId) {
        self.slots.remove(user);
    }
}

impl ViewCache<Ticket> {
    /// Requests a status change for one ticket. Any status may follow any
    /// other; the store bumps `updated_at`. The slot is invalidated on
    /// success so the next fetch shows the stored record; on failure the
    /// prior status stays displayed.
    pub fn update_status(
        &mut self,
        user: Option<&UserId>,
        ticket_id: &str,
        status: TicketStatus,
    ) -> Result<Ticket, AppError> {
        let Some(user) = user else {
            debug_assert!(false, "status update reached the cache without a session");
            return Err(AppError::Unauthenticated);
        };
        let mut patch = Row::new();
        patch.insert(
            "status".to_string(),
            Value::String(status.as_str().to_string()),
        );
        let stored = self
            .store
            .update(Ticket::KIND.table(), ticket_id, patch)
            .map_err(|err| AppError::UpdateFailed(DataError::Store(err)))?;
        let record = Ticket::from_row(stored)
            .map_err(|err| AppError::UpdateFailed(DataError::Wire(err)))?;
        self.slots.remove(user);
        Ok(record)
    }
}
