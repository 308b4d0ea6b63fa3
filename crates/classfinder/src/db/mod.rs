/// Database module for saved courses
use crate::error::{ClassFinderError, Result};
use crate::types::{CourseRecord, EnrichedCourse, RatingInfo, SavedCourse};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

const SCHEMA_SQL: &str = include_str!("../../../../sql/init_saved_courses.sql");

const SELECT_COLUMNS: &str = "saved_id, owner_id, class_name, class_title, section, instructor,
    instruction_mode, days, class_time, building, available_seats, total_enrolled, waitlist,
    avg_difficulty, avg_rating, num_ratings";

/// Result of saving a course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    /// A row with the same identity key already exists
    AlreadySaved,
}

#[derive(Debug)]
pub struct SavedCourseDb {
    db: Mutex<Connection>,
}

impl SavedCourseDb {
    /// Opens (or creates) the database file and initializes the schema
    pub fn open(db_path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(db_path)?)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Opens the database and probes it, retrying up to `retries` extra times.
    ///
    /// # Returns
    /// * `Ok(SavedCourseDb)` - A connection that answered the probe
    /// * `Err(StorageUnavailable)` - Every attempt failed
    pub fn connect(db_path: &Path, retries: u32) -> Result<Self> {
        let attempts = retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match Self::open(db_path).and_then(|db| db.check_connectivity().map(|_| db)) {
                Ok(db) => {
                    info!(path = %db_path.display(), "Connected to saved-course storage");
                    return Ok(db);
                }
                Err(e) => {
                    warn!(attempt = attempt, error = %e, "Storage connectivity check failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(ClassFinderError::StorageUnavailable {
            attempts,
            message: last_error,
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| ClassFinderError::Storage {
            message: "database lock poisoned".to_string(),
        })
    }

    /// Runs a trivial query to make sure the connection works
    pub fn check_connectivity(&self) -> Result<()> {
        let db = self.conn()?;
        db.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    /// Runs `op`; if the table has gone missing, recreates it and runs `op` once more.
    ///
    /// The inner result is left as a `rusqlite` error so callers can inspect it.
    fn with_table<T>(
        &self,
        op: impl Fn(&Connection) -> rusqlite::Result<T>,
    ) -> Result<rusqlite::Result<T>> {
        let db = self.conn()?;
        match op(&db) {
            Err(e) if is_missing_table(&e) => {
                warn!("saved_courses table missing, recreating it");
                db.execute_batch(SCHEMA_SQL)?;
                Ok(op(&db))
            }
            other => Ok(other),
        }
    }

    /// Saves `course` for `owner_id`
    pub fn insert(&self, course: &EnrichedCourse, owner_id: &str) -> Result<SaveOutcome> {
        let c = &course.course;
        let created_at = chrono::Utc::now().to_rfc3339();

        let result = self.with_table(|db| {
            db.execute(
                "INSERT INTO saved_courses (
                    saved_id, owner_id, class_name, class_title, section, instructor,
                    instruction_mode, days, class_time, building, available_seats,
                    total_enrolled, waitlist, avg_difficulty, avg_rating, num_ratings, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                params![
                    course.id,
                    owner_id,
                    c.class_name,
                    c.class_title,
                    c.section,
                    c.instructor,
                    c.instruction_mode,
                    c.days,
                    c.class_time,
                    c.building,
                    c.available_seats,
                    c.total_enrolled,
                    c.waitlist,
                    course.avg_difficulty(),
                    course.avg_rating(),
                    course.num_ratings(),
                    created_at,
                ],
            )
        })?;

        match result {
            Ok(_) => {
                info!(saved_id = %course.id, "Saved course");
                Ok(SaveOutcome::Added)
            }
            Err(e) if is_unique_violation(&e) => Ok(SaveOutcome::AlreadySaved),
            Err(e) => Err(e.into()),
        }
    }

    /// Gets every course saved by `owner_id`, oldest first
    pub fn list_for_owner(&self, owner_id: &str) -> Result<Vec<SavedCourse>> {
        let sql = format!(
            "SELECT {} FROM saved_courses WHERE owner_id = ? ORDER BY rowid",
            SELECT_COLUMNS
        );
        let saved = self.with_table(|db| {
            let mut stmt = db.prepare(&sql)?;
            let rows = stmt.query_map([owner_id], row_to_saved)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })??;
        Ok(saved)
    }

    /// Removes one of `owner_id`'s saved courses by identity key. Returns false if nothing matched.
    pub fn remove(&self, saved_id: &str, owner_id: &str) -> Result<bool> {
        let removed = self.with_table(|db| {
            db.execute(
                "DELETE FROM saved_courses WHERE saved_id = ? AND owner_id = ?",
                [saved_id, owner_id],
            )
        })??;
        Ok(removed > 0)
    }

    /// Removes every course saved by `owner_id`, returning how many were removed
    pub fn remove_all_for_owner(&self, owner_id: &str) -> Result<usize> {
        let removed = self.with_table(|db| {
            db.execute("DELETE FROM saved_courses WHERE owner_id = ?", [owner_id])
        })??;
        info!(owner_id = %owner_id, removed = removed, "Removed all saved courses");
        Ok(removed)
    }

    /// Drops and recreates the table (development use)
    pub fn rebuild(&self) -> Result<()> {
        let db = self.conn()?;
        db.execute_batch("DROP TABLE IF EXISTS saved_courses;")?;
        db.execute_batch(SCHEMA_SQL)?;
        info!("Rebuilt saved_courses table");
        Ok(())
    }
}

fn row_to_saved(row: &Row<'_>) -> rusqlite::Result<SavedCourse> {
    let course = CourseRecord {
        class_name: row.get(2)?,
        class_title: row.get(3)?,
        section: row.get(4)?,
        instructor: row.get(5)?,
        instruction_mode: row.get(6)?,
        days: row.get(7)?,
        class_time: row.get(8)?,
        building: row.get(9)?,
        available_seats: row.get(10)?,
        total_enrolled: row.get(11)?,
        waitlist: row.get(12)?,
    };

    let avg_difficulty: Option<f64> = row.get(13)?;
    let avg_rating: Option<f64> = row.get(14)?;
    let num_ratings: Option<u32> = row.get(15)?;
    let rating = match (avg_difficulty, avg_rating, num_ratings) {
        (Some(avg_difficulty), Some(avg_rating), Some(num_ratings)) => Some(RatingInfo {
            avg_difficulty,
            avg_rating,
            num_ratings,
        }),
        _ => None,
    };

    Ok(SavedCourse {
        owner_id: row.get(1)?,
        course: EnrichedCourse::from_parts(row.get(0)?, course, rating),
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

fn is_missing_table(err: &rusqlite::Error) -> bool {
    err.to_string().contains("no such table")
}
