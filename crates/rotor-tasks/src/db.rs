use rusqlite::Connection;

use crate::error::Result;

/// Initialise the task schema in `conn`.
///
/// Creates the `tasks` table (idempotent) and an index on `due_at` so the
/// 1 Hz polling query stays cheap.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id         TEXT    NOT NULL PRIMARY KEY,
            tag        TEXT    NOT NULL,
            due_at     INTEGER NOT NULL,   -- epoch milliseconds
            created_at TEXT    NOT NULL
        ) STRICT;

        -- Efficient polling: SELECT … WHERE due_at <= ?  ORDER BY due_at
        CREATE INDEX IF NOT EXISTS idx_tasks_due_at ON tasks (due_at);
        ",
    )?;
    Ok(())
}
