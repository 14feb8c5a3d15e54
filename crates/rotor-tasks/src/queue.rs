use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::Connection;
use tracing::info;
use uuid::Uuid;

use crate::db::init_db;
use crate::error::Result;
use crate::types::DeferredTask;

/// Shared handle for enqueuing and cancelling deferred tasks.
///
/// Uses its own `Connection` wrapped in a `Mutex`; clones share it. The
/// facility stores rows only; timing is the [`crate::runner::TaskRunner`]'s
/// job.
#[derive(Clone)]
pub struct TaskQueue {
    db: Arc<Mutex<Connection>>,
}

impl TaskQueue {
    /// Wrap a connection, initialising the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert one task due `delay_secs` after `now_ms`.
    ///
    /// The facility does not replace existing tasks with the same tag;
    /// callers wanting single-task exclusivity must [`Self::cancel_all`]
    /// first.
    pub fn enqueue(&self, tag: &str, delay_secs: u64, now_ms: i64) -> Result<DeferredTask> {
        let id = Uuid::new_v4().to_string();
        let due_at = now_ms + (delay_secs as i64) * 1000;
        let created_at = Utc::now().to_rfc3339();

        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO tasks (id, tag, due_at, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, tag, due_at, created_at],
        )?;
        info!(task_id = %id, %tag, due_at, "task enqueued");

        Ok(DeferredTask {
            id,
            tag: tag.to_string(),
            due_at,
            created_at,
        })
    }

    /// Delete every task carrying `tag`. Returns the number removed.
    pub fn cancel_all(&self, tag: &str) -> Result<usize> {
        let db = self.db.lock().unwrap();
        let n = db.execute("DELETE FROM tasks WHERE tag = ?1", [tag])?;
        if n > 0 {
            info!(%tag, count = n, "tasks cancelled");
        }
        Ok(n)
    }

    /// Count tasks still queued under `tag`.
    pub fn outstanding(&self, tag: &str) -> Result<usize> {
        let db = self.db.lock().unwrap();
        let n: i64 = db.query_row(
            "SELECT COUNT(*) FROM tasks WHERE tag = ?1",
            [tag],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    /// Pop every task whose `due_at` has arrived, oldest first.
    ///
    /// Popped rows are deleted before being returned, so a task fires at
    /// most once per pop even when several pollers share the table.
    pub fn due(&self, now_ms: i64) -> Result<Vec<DeferredTask>> {
        let db = self.db.lock().unwrap();

        let due: Vec<DeferredTask> = {
            let mut stmt = db.prepare_cached(
                "SELECT id, tag, due_at, created_at FROM tasks
                 WHERE due_at <= ?1 ORDER BY due_at",
            )?;
            let rows = stmt
                .query_map([now_ms], |row| {
                    Ok(DeferredTask {
                        id: row.get(0)?,
                        tag: row.get(1)?,
                        due_at: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();
            rows
        };

        for task in &due {
            db.execute("DELETE FROM tasks WHERE id = ?1", [&task.id])?;
        }
        Ok(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> TaskQueue {
        TaskQueue::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn enqueue_sets_due_at_from_delay() {
        let queue = open();
        let task = queue.enqueue("switch", 45, 1_000).unwrap();
        assert_eq!(task.due_at, 46_000);
        assert_eq!(queue.outstanding("switch").unwrap(), 1);
    }

    #[test]
    fn cancel_all_only_touches_matching_tag() {
        let queue = open();
        queue.enqueue("switch", 10, 0).unwrap();
        queue.enqueue("switch", 20, 0).unwrap();
        queue.enqueue("other", 10, 0).unwrap();

        assert_eq!(queue.cancel_all("switch").unwrap(), 2);
        assert_eq!(queue.outstanding("switch").unwrap(), 0);
        assert_eq!(queue.outstanding("other").unwrap(), 1);
    }

    #[test]
    fn due_pops_only_arrived_tasks() {
        let queue = open();
        queue.enqueue("switch", 10, 0).unwrap(); // due at 10_000
        queue.enqueue("switch", 60, 0).unwrap(); // due at 60_000

        let fired = queue.due(10_000).unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].due_at, 10_000);

        // The fired row is gone; the future one remains.
        assert_eq!(queue.outstanding("switch").unwrap(), 1);
        assert!(queue.due(10_000).unwrap().is_empty());
    }

    #[test]
    fn due_returns_oldest_first() {
        let queue = open();
        queue.enqueue("switch", 30, 0).unwrap();
        queue.enqueue("switch", 10, 0).unwrap();

        let fired = queue.due(60_000).unwrap();
        assert_eq!(fired.len(), 2);
        assert!(fired[0].due_at <= fired[1].due_at);
    }
}
