#![forbid(unsafe_code)]

mod contract;
mod error;
mod schema;
mod sessions;

pub use contract::{RemoteStore, Row, RowFilter, RowOrder};
pub use error::StoreError;
pub use sessions::{SessionHub, SessionListener, SessionSubscription};

use ad_core::ids::UserId;
use ad_core::session::{Session, User};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Keys owned by the store; stripped from caller-supplied rows and patches.
const RESERVED_KEYS: &[&str] = &["id", "user_id", "created_at", "updated_at"];

pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Local table-store backend. Each entity table keeps promoted columns for
/// id, owner and timestamps, plus a JSON payload for the remaining wire
/// fields. Sessions live in memory only.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    sessions: SessionHub,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("artdesk.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::install_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            sessions: SessionHub::new(),
            storage_dir,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Local session issuance for the portal binary and tests. A hosted
    /// deployment would receive sessions from the auth provider instead.
    pub fn sign_in(
        &self,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Session, StoreError> {
        let id = UserId::try_new(user_id).map_err(|_| StoreError::InvalidInput("user id"))?;
        let session = Session {
            user: User {
                id,
                email: email.into(),
            },
        };
        self.sessions.sign_in(session.clone());
        Ok(session)
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl RemoteStore for SqliteStore {
    fn query(
        &self,
        table: &str,
        filter: Option<&RowFilter>,
        order: RowOrder,
    ) -> Result<Vec<Row>, StoreError> {
        ensure_entity_table(table)?;
        let order_column = promoted_column(order.field)?;
        let direction = if order.ascending { "ASC" } else { "DESC" };

        let mut sql = format!(
            "SELECT id, user_id, payload_json, created_at_ms, updated_at_ms FROM {table}"
        );
        let mut bind: Vec<String> = Vec::new();
        if let Some(filter) = filter {
            let filter_column = promoted_column(filter.field)?;
            sql.push_str(&format!(" WHERE {filter_column} = ?1"));
            bind.push(filter.equals.clone());
        }
        // Ids are monotonic per table, so they break created-at ties in
        // creation order.
        sql.push_str(&format!(" ORDER BY {order_column} {direction}, id {direction}"));

        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut collected = Vec::new();
        let mut rows = stmt.query(rusqlite::params_from_iter(bind.iter()))?;
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let user_id: String = row.get(1)?;
            let payload_json: String = row.get(2)?;
            let created_at_ms: i64 = row.get(3)?;
            let updated_at_ms: i64 = row.get(4)?;
            collected.push(assemble_row(
                &id,
                &user_id,
                &payload_json,
                created_at_ms,
                updated_at_ms,
            )?);
        }
        Ok(collected)
    }

    fn insert(&self, table: &str, row: Row) -> Result<Row, StoreError> {
        ensure_entity_table(table)?;
        let Some(user_id) = row.get("user_id").and_then(Value::as_str).map(String::from) else {
            return Err(StoreError::InvalidInput("row requires user_id"));
        };

        let mut payload = row;
        for key in RESERVED_KEYS {
            payload.remove(*key);
        }
        let payload_json = Value::Object(payload.clone()).to_string();

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let seq = next_seq(&tx, table)?;
        let id = format!("{}-{seq:06}", schema::id_prefix(table));
        let now = now_ms();
        tx.execute(
            &format!(
                "INSERT INTO {table}(id, user_id, payload_json, created_at_ms, updated_at_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            params![id, user_id, payload_json, now, now],
        )?;
        tx.commit()?;

        let mut stored = Row::new();
        stored.insert("id".to_string(), Value::String(id));
        stored.insert("user_id".to_string(), Value::String(user_id));
        for (key, value) in payload {
            stored.insert(key, value);
        }
        stored.insert("created_at".to_string(), Value::from(now));
        stored.insert("updated_at".to_string(), Value::from(now));
        Ok(stored)
    }

    fn update(&self, table: &str, id: &str, patch: Row) -> Result<Row, StoreError> {
        ensure_entity_table(table)?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!(
                    "SELECT user_id, payload_json, created_at_ms, updated_at_ms \
                     FROM {table} WHERE id = ?1"
                ),
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;
        let Some((user_id, payload_json, created_at_ms, old_updated_at_ms)) = existing else {
            return Err(StoreError::UnknownId);
        };

        let mut payload = parse_payload(&payload_json)?;
        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            payload.insert(key, value);
        }

        // Strictly greater even when two updates land in one clock tick.
        let updated_at_ms = now_ms().max(old_updated_at_ms + 1);
        tx.execute(
            &format!("UPDATE {table} SET payload_json = ?1, updated_at_ms = ?2 WHERE id = ?3"),
            params![Value::Object(payload.clone()).to_string(), updated_at_ms, id],
        )?;
        tx.commit()?;

        let mut stored = Row::new();
        stored.insert("id".to_string(), Value::String(id.to_string()));
        stored.insert("user_id".to_string(), Value::String(user_id));
        for (key, value) in payload {
            stored.insert(key, value);
        }
        stored.insert("created_at".to_string(), Value::from(created_at_ms));
        stored.insert("updated_at".to_string(), Value::from(updated_at_ms));
        Ok(stored)
    }

    fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    fn subscribe_sessions(&self, listener: SessionListener) -> SessionSubscription {
        self.sessions.subscribe(listener)
    }

    fn sign_out(&self) -> Result<(), StoreError> {
        self.sessions.sign_out();
        Ok(())
    }
}

fn ensure_entity_table(table: &str) -> Result<(), StoreError> {
    if schema::is_entity_table(table) {
        Ok(())
    } else {
        Err(StoreError::UnknownTable(table.to_string()))
    }
}

fn promoted_column(field: &str) -> Result<&'static str, StoreError> {
    match field {
        "id" => Ok("id"),
        "user_id" => Ok("user_id"),
        "created_at" => Ok("created_at_ms"),
        "updated_at" => Ok("updated_at_ms"),
        _ => Err(StoreError::InvalidInput("unsupported row field")),
    }
}

fn next_seq(tx: &Transaction<'_>, table: &str) -> Result<i64, rusqlite::Error> {
    tx.execute(
        "INSERT INTO id_seq(table_name, next) VALUES (?1, 1) \
         ON CONFLICT(table_name) DO UPDATE SET next = next + 1",
        params![table],
    )?;
    tx.query_row(
        "SELECT next FROM id_seq WHERE table_name = ?1",
        params![table],
        |row| row.get(0),
    )
}

fn parse_payload(payload_json: &str) -> Result<Row, StoreError> {
    match serde_json::from_str::<Value>(payload_json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::CorruptRow("payload is not an object")),
        Err(_) => Err(StoreError::CorruptRow("payload is not valid json")),
    }
}

fn assemble_row(
    id: &str,
    user_id: &str,
    payload_json: &str,
    created_at_ms: i64,
    updated_at_ms: i64,
) -> Result<Row, StoreError> {
    let payload = parse_payload(payload_json)?;
    let mut row = Row::new();
    row.insert("id".to_string(), Value::String(id.to_string()));
    row.insert("user_id".to_string(), Value::String(user_id.to_string()));
    for (key, value) in payload {
        row.insert(key, value);
    }
    row.insert("created_at".to_string(), Value::from(created_at_ms));
    row.insert("updated_at".to_string(), Value::from(updated_at_ms));
    Ok(row)
}
