#![forbid(unsafe_code)]

use rusqlite::Connection;

/// Entity tables share one shape: promoted columns for the fields the store
/// filters and orders on, everything else in `payload_json`.
const ENTITY_TABLES: &[&str] = &["tickets", "leads", "clients"];

const SQL_ID_SEQ: &str = "CREATE TABLE IF NOT EXISTS id_seq(\
     table_name TEXT PRIMARY KEY,\
     next INTEGER NOT NULL\
 )";

pub(crate) fn install_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(SQL_ID_SEQ, [])?;
    for table in ENTITY_TABLES {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table}(\
                 id TEXT PRIMARY KEY,\
                 user_id TEXT NOT NULL,\
                 payload_json TEXT NOT NULL,\
                 created_at_ms INTEGER NOT NULL,\
                 updated_at_ms INTEGER NOT NULL\
             )"
            ),
            [],
        )?;
        conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_owner_created \
                 ON {table}(user_id, created_at_ms DESC)"
            ),
            [],
        )?;
    }
    Ok(())
}

pub(crate) fn is_entity_table(table: &str) -> bool {
    ENTITY_TABLES.contains(&table)
}

pub(crate) fn id_prefix(table: &str) -> &'static str {
    match table {
        "tickets" => "tkt",
        "leads" => "lead",
        _ => "cli",
    }
}
