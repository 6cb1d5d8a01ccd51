use std::collections::HashSet;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{
    named_params, params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

use crate::config::AppConfig;
use crate::model::{NewTask, Task, TaskId, ThemeMode, ToggleOutcome};

const META_TOTAL_CREATED: &str = "total_created";
const META_THEME: &str = "theme";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SAMPLE_TASKS: &[(&str, bool)] = &[
    ("Sample Task 1", false),
    ("Sample Task 2", false),
    ("Sample Task 3", false),
    ("Sample Task 4", false),
    ("Sample Task 5", true),
    ("Sample Task 6", false),
];

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to configure SQLite busy timeout")?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// All tasks in display order.
    pub fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, completed, sort_rank, created_at FROM tasks ORDER BY sort_rank ASC, id ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(self.map_task(row)?);
        }
        Ok(tasks)
    }

    pub fn fetch_task(&self, id: TaskId) -> Result<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, completed, sort_rank, created_at FROM tasks WHERE id = ? LIMIT 1",
        )?;
        let mut rows = stmt.query([id as i64])?;
        if let Some(row) = rows.next()? {
            Ok(Some(self.map_task(row)?))
        } else {
            Ok(None)
        }
    }

    /// Insert a task, honouring the proposed id only when it has never been
    /// issued before. Returns the stored row.
    ///
    /// Reading the counter, inserting and raising the counter happen under
    /// one write lock, so concurrent connections never issue the same id.
    pub fn insert_task(&self, new_task: &NewTask) -> Result<Task> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
            .context("Failed to start insert transaction")?;

        let issued = self.total_created()?.max(self.max_id()?);
        let id = match new_task.id {
            Some(proposed) if proposed > issued => proposed,
            _ => issued + 1,
        };
        let rank = self.max_sort_rank()? + 1;
        let now = Utc::now();

        self.conn.execute(
            "INSERT INTO tasks (id, text, completed, sort_rank, created_at)
             VALUES (:id, :text, 0, :sort_rank, :created_at)",
            named_params![
                ":id": id as i64,
                ":text": &new_task.text,
                ":sort_rank": rank,
                ":created_at": now.to_rfc3339(),
            ],
        )?;
        self.raise_total_created(id)?;
        let task = self
            .fetch_task(id)?
            .ok_or_else(|| anyhow!("Task {} vanished after insert", id))?;

        tx.commit()?;
        Ok(task)
    }

    pub fn toggle_status(&self, id: TaskId) -> Result<Option<ToggleOutcome>> {
        let updated = self.conn.execute(
            "UPDATE tasks SET completed = 1 - completed WHERE id = :id",
            named_params![":id": id as i64],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        let completed = self
            .fetch_task(id)?
            .map(|task| task.completed)
            .unwrap_or_default();
        Ok(Some(ToggleOutcome { id, completed }))
    }

    pub fn delete_task(&self, id: TaskId) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = :id", named_params![":id": id as i64])?;
        Ok(affected > 0)
    }

    pub fn delete_completed(&self) -> Result<usize> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE completed = 1", [])?;
        Ok(affected)
    }

    /// Rewrite sort ranks so that `ordered` comes first, in that order. Unknown
    /// ids are skipped; tasks absent from `ordered` follow in their current order.
    pub fn update_sort_ranks(&mut self, ordered: &[TaskId]) -> Result<usize> {
        let current: Vec<TaskId> = self.fetch_tasks()?.into_iter().map(|t| t.id).collect();
        let known: HashSet<TaskId> = current.iter().copied().collect();

        let mut seen = HashSet::new();
        let mut sequence: Vec<TaskId> = ordered
            .iter()
            .copied()
            .filter(|id| known.contains(id) && seen.insert(*id))
            .collect();
        sequence.extend(current.into_iter().filter(|id| !seen.contains(id)));

        let tx = self.conn.transaction()?;
        for (idx, id) in sequence.iter().enumerate() {
            tx.execute(
                "UPDATE tasks SET sort_rank = :rank WHERE id = :id",
                named_params![":rank": (idx + 1) as i64, ":id": *id as i64],
            )?;
        }
        tx.commit()?;
        Ok(sequence.len())
    }

    /// Number of ids ever issued by this store.
    pub fn total_created(&self) -> Result<TaskId> {
        match self.get_meta(META_TOTAL_CREATED)? {
            Some(raw) => raw
                .parse::<TaskId>()
                .map_err(|e| anyhow!("Corrupt total_created counter '{}': {}", raw, e)),
            None => Ok(0),
        }
    }

    pub fn theme(&self) -> Result<Option<ThemeMode>> {
        self.get_meta(META_THEME)?
            .map(|raw| raw.parse::<ThemeMode>())
            .transpose()
    }

    pub fn set_theme(&self, theme: ThemeMode) -> Result<()> {
        self.set_meta(META_THEME, theme.as_str())
    }

    /// Populate an empty store with the sample list. Returns whether rows were added.
    pub fn seed_sample_tasks(&self) -> Result<bool> {
        if !self.fetch_tasks()?.is_empty() {
            return Ok(false);
        }
        for (text, completed) in SAMPLE_TASKS {
            let task = self.insert_task(&NewTask::unnumbered(*text))?;
            if *completed {
                self.toggle_status(task.id)?;
            }
        }
        Ok(true)
    }

    fn max_id(&self) -> Result<TaskId> {
        let max: i64 = self
            .conn
            .query_row("SELECT COALESCE(MAX(id), 0) FROM tasks", [], |row| row.get(0))?;
        Ok(max.max(0) as TaskId)
    }

    fn max_sort_rank(&self) -> Result<i64> {
        let max: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_rank), 0) FROM tasks",
            [],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?;
        Ok(value.flatten())
    }

    fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// The counter only ever moves up.
    fn raise_total_created(&self, id: TaskId) -> Result<()> {
        self.conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE
             SET value = CAST(MAX(CAST(value AS INTEGER), CAST(excluded.value AS INTEGER)) AS TEXT)",
            params![META_TOTAL_CREATED, id.to_string()],
        )?;
        Ok(())
    }

    fn map_task(&self, row: &Row<'_>) -> Result<Task> {
        Ok(Task {
            id: row.get::<_, i64>(0)? as TaskId,
            text: row.get(1)?,
            completed: row.get::<_, i64>(2)? != 0,
            sort_rank: row.get::<_, Option<i64>>(3)?,
            created_at: parse_datetime_required(row.get::<_, String>(4)?)?,
        })
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS meta (key TEXT PRIMARY KEY, value TEXT);
             CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                text TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                sort_rank INTEGER NOT NULL,
                created_at TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_tasks_sort_rank ON tasks(sort_rank);
            ",
        )?;
        Ok(())
    }
}

fn parse_datetime_required(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", raw, e))
}
