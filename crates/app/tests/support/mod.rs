#![forbid(unsafe_code)]
// Each test binary uses its own slice of this helper.
#![allow(dead_code)]

use ad_core::ids::UserId;
use ad_core::session::{Session, User};
use ad_storage::{
    RemoteStore, Row, RowFilter, RowOrder, SessionHub, SessionListener, SessionSubscription,
    StoreError,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed clock origin so stored timestamps are deterministic.
pub const BASE_MS: i64 = 1_700_000_000_000;

pub fn shared(store: &std::sync::Arc<FakeStore>) -> std::sync::Arc<dyn RemoteStore> {
    std::sync::Arc::<FakeStore>::clone(store)
}

const RESERVED_KEYS: &[&str] = &["id", "created_at", "updated_at"];

/// In-memory table store with call counters and one-shot fault injection.
#[derive(Default)]
pub struct FakeStore {
    pub sessions: SessionHub,
    tables: Mutex<HashMap<String, Vec<Row>>>,
    next_seq: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    faults: Mutex<Faults>,
}

#[derive(Default)]
struct Faults {
    query: bool,
    insert: bool,
    update: bool,
    sign_out: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: &str) -> Self {
        let store = Self::default();
        store.sign_in(user);
        store
    }

    pub fn sign_in(&self, user: &str) {
        let id = UserId::try_new(user).expect("valid user id");
        self.sessions.sign_in(Session {
            user: User {
                id,
                email: format!("{user}@gallery.test"),
            },
        });
    }

    pub fn fail_next_query(&self) {
        self.faults.lock().expect("faults lock").query = true;
    }

    pub fn fail_next_insert(&self) {
        self.faults.lock().expect("faults lock").insert = true;
    }

    pub fn fail_next_update(&self) {
        self.faults.lock().expect("faults lock").update = true;
    }

    pub fn fail_next_sign_out(&self) {
        self.faults.lock().expect("faults lock").sign_out = true;
    }

    /// Seeds a row through the normal insert path.
    pub fn seed(&self, table: &str, row: Value) -> Row {
        let Value::Object(row) = row else {
            panic!("seed rows must be json objects");
        };
        self.insert(table, row).expect("seed insert")
    }

    fn take_fault(&self, pick: impl Fn(&mut Faults) -> &mut bool) -> bool {
        let mut faults = self.faults.lock().expect("faults lock");
        std::mem::take(pick(&mut faults))
    }
}

impl RemoteStore for FakeStore {
    fn query(
        &self,
        table: &str,
        filter: Option<&RowFilter>,
        order: RowOrder,
    ) -> Result<Vec<Row>, StoreError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.take_fault(|faults| &mut faults.query) {
            return Err(StoreError::Unavailable("query"));
        }

        let tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| rows.clone())
            .unwrap_or_default();
        if let Some(filter) = filter {
            rows.retain(|row| {
                row.get(filter.field)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value == filter.equals)
            });
        }
        rows.sort_by(|a, b| {
            let left = (
                a.get(order.field).and_then(Value::as_i64).unwrap_or(0),
                a.get("id").and_then(Value::as_str).unwrap_or(""),
            );
            let right = (
                b.get(order.field).and_then(Value::as_i64).unwrap_or(0),
                b.get("id").and_then(Value::as_str).unwrap_or(""),
            );
            if order.ascending {
                left.partial_cmp(&right).expect("comparable keys")
            } else {
                right.partial_cmp(&left).expect("comparable keys")
            }
        });
        Ok(rows)
    }

    fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.take_fault(|faults| &mut faults.insert) {
            return Err(StoreError::Unavailable("insert"));
        }
        if !row.get("user_id").is_some_and(|value| value.is_string()) {
            return Err(StoreError::InvalidInput("row requires user_id"));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let now = BASE_MS + seq;
        let mut stored = row;
        for key in RESERVED_KEYS {
            stored.remove(*key);
        }
        stored.insert("id".to_string(), Value::String(format!("rec-{seq:06}")));
        stored.insert("created_at".to_string(), Value::from(now));
        stored.insert("updated_at".to_string(), Value::from(now));

        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn update(&self, table: &str, id: &str, patch: Row) -> Result<Row, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.take_fault(|faults| &mut faults.update) {
            return Err(StoreError::Unavailable("update"));
        }

        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let rows = tables.get_mut(table).ok_or(StoreError::UnknownId)?;
        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or(StoreError::UnknownId)?;

        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) || key == "user_id" {
                continue;
            }
            row.insert(key, value);
        }
        let bumped = row.get("updated_at").and_then(Value::as_i64).unwrap_or(0) + 1;
        row.insert("updated_at".to_string(), Value::from(bumped));
        Ok(row.clone())
    }

    fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription {
        self.sessions.subscribe(listener)
    }

    fn sign_out(&self) -> Result<(), StoreError> {
        if self.take_fault(|faults| &mut faults.sign_out) {
            return Err(StoreError::Unavailable("sign out"));
        }
        self.sessions.sign_out();
        Ok(())
    }
}
