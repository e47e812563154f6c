use chrono::{DateTime, Duration, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::db::DatabasePool;
use crate::domain::{self, end_of_day, ListFilter};
use crate::error::{AppError, AppResult};
use crate::models::{CreateReminderRequest, Reminder, UpdateReminderRequest};

pub struct ReminderService {
    db: DatabasePool,
}

impl ReminderService {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    pub async fn create_reminder(&self, req: CreateReminderRequest) -> AppResult<Reminder> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let title = req.title.trim().to_string();
        let expiry_date = end_of_day(req.expiry_date);

        match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO reminders (
                        id, title, description, barcode, expiry_date,
                        category, priority, is_completed, created_at, updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(id)
                .bind(&title)
                .bind(&req.description)
                .bind(&req.barcode)
                .bind(expiry_date)
                .bind(req.category.as_str())
                .bind(req.priority.as_str())
                .bind(false)
                .bind(now)
                .bind(now)
                .execute(pool)
                .await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO reminders (
                        id, title, description, barcode, expiry_date,
                        category, priority, is_completed, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                    "#,
                )
                .bind(id)
                .bind(&title)
                .bind(&req.description)
                .bind(&req.barcode)
                .bind(expiry_date)
                .bind(req.category.as_str())
                .bind(req.priority.as_str())
                .bind(false)
                .bind(now)
                .bind(now)
                .execute(pool)
                .await?;
            }
        }

        self.get_reminder(id).await
    }

    pub async fn get_reminder(&self, id: Uuid) -> AppResult<Reminder> {
        match &self.db {
            DatabasePool::Postgres(pool) => {
                let row = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(pool)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Reminder with id {} not found", id)))?;

                self.row_to_reminder_postgres(row)
            }
            DatabasePool::Sqlite(pool) => {
                let row = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .fetch_optional(pool)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Reminder with id {} not found", id)))?;

                self.row_to_reminder(row)
            }
        }
    }

    /// Fetches everything ordered by expiry date ascending, then applies the
    /// category/status filter and requested sort in memory against a single
    /// reference instant.
    pub async fn list_reminders(
        &self,
        filter: &ListFilter,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Reminder>> {
        let reminders = match &self.db {
            DatabasePool::Postgres(pool) => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    ORDER BY expiry_date ASC
                    "#,
                )
                .fetch_all(pool)
                .await?;

                rows.into_iter()
                    .map(|row| self.row_to_reminder_postgres(row))
                    .collect::<AppResult<Vec<Reminder>>>()?
            }
            DatabasePool::Sqlite(pool) => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    ORDER BY expiry_date ASC
                    "#,
                )
                .fetch_all(pool)
                .await?;

                rows.into_iter()
                    .map(|row| self.row_to_reminder(row))
                    .collect::<AppResult<Vec<Reminder>>>()?
            }
        };

        Ok(domain::filter::apply(&reminders, filter, now))
    }

    /// Reminders expiring within the next seven days, completed ones excluded.
    pub async fn upcoming_reminders(&self, now: DateTime<Utc>) -> AppResult<Vec<Reminder>> {
        let next_week = now + Duration::days(7);

        match &self.db {
            DatabasePool::Postgres(pool) => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE expiry_date >= $1 AND expiry_date <= $2 AND is_completed = FALSE
                    ORDER BY expiry_date ASC
                    "#,
                )
                .bind(now)
                .bind(next_week)
                .fetch_all(pool)
                .await?;

                rows.into_iter()
                    .map(|row| self.row_to_reminder_postgres(row))
                    .collect()
            }
            DatabasePool::Sqlite(pool) => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE expiry_date >= ?1 AND expiry_date <= ?2 AND is_completed = 0
                    ORDER BY expiry_date ASC
                    "#,
                )
                .bind(now)
                .bind(next_week)
                .fetch_all(pool)
                .await?;

                rows.into_iter().map(|row| self.row_to_reminder(row)).collect()
            }
        }
    }

    /// Partial update: only fields present in the request are applied; an
    /// incoming expiry date is re-normalized to end of day.
    pub async fn update_reminder(
        &self,
        id: Uuid,
        req: UpdateReminderRequest,
    ) -> AppResult<Reminder> {
        // 404 before touching anything
        let _existing = self.get_reminder(id).await?;

        let now = Utc::now();
        let title = req.title.map(|t| t.trim().to_string());
        let expiry_date = req.expiry_date.map(end_of_day);
        let category = req.category.map(|c| c.as_str());
        let priority = req.priority.map(|p| p.as_str());

        match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query(
                    r#"
                    UPDATE reminders SET
                        title = COALESCE($2, title),
                        description = COALESCE($3, description),
                        barcode = COALESCE($4, barcode),
                        expiry_date = COALESCE($5, expiry_date),
                        category = COALESCE($6, category),
                        priority = COALESCE($7, priority),
                        is_completed = COALESCE($8, is_completed),
                        updated_at = $9
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(&title)
                .bind(&req.description)
                .bind(&req.barcode)
                .bind(expiry_date)
                .bind(category)
                .bind(priority)
                .bind(req.is_completed)
                .bind(now)
                .execute(pool)
                .await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    UPDATE reminders SET
                        title = COALESCE(?2, title),
                        description = COALESCE(?3, description),
                        barcode = COALESCE(?4, barcode),
                        expiry_date = COALESCE(?5, expiry_date),
                        category = COALESCE(?6, category),
                        priority = COALESCE(?7, priority),
                        is_completed = COALESCE(?8, is_completed),
                        updated_at = ?9
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .bind(&title)
                .bind(&req.description)
                .bind(&req.barcode)
                .bind(expiry_date)
                .bind(category)
                .bind(priority)
                .bind(req.is_completed)
                .bind(now)
                .execute(pool)
                .await?;
            }
        }

        self.get_reminder(id).await
    }

    pub async fn delete_reminder(&self, id: Uuid) -> AppResult<()> {
        let rows_affected = match &self.db {
            DatabasePool::Postgres(pool) => {
                sqlx::query("DELETE FROM reminders WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query("DELETE FROM reminders WHERE id = ?1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
        };

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Reminder with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Most recently created reminder carrying the given barcode, if any.
    pub async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Reminder>> {
        match &self.db {
            DatabasePool::Postgres(pool) => {
                let row = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE barcode = $1
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(barcode)
                .fetch_optional(pool)
                .await?;

                row.map(|row| self.row_to_reminder_postgres(row)).transpose()
            }
            DatabasePool::Sqlite(pool) => {
                let row = sqlx::query(
                    r#"
                    SELECT id, title, description, barcode, expiry_date,
                           category, priority, is_completed, created_at, updated_at
                    FROM reminders
                    WHERE barcode = ?1
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(barcode)
                .fetch_optional(pool)
                .await?;

                row.map(|row| self.row_to_reminder(row)).transpose()
            }
        }
    }

    fn row_to_reminder(&self, row: sqlx::sqlite::SqliteRow) -> AppResult<Reminder> {
        let category: String = row.get("category");
        let priority: String = row.get("priority");

        Ok(Reminder {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            barcode: row.get("barcode"),
            expiry_date: row.get("expiry_date"),
            category: category.parse().map_err(AppError::InternalServerError)?,
            priority: priority.parse().map_err(AppError::InternalServerError)?,
            is_completed: row.get("is_completed"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn row_to_reminder_postgres(&self, row: sqlx::postgres::PgRow) -> AppResult<Reminder> {
        let category: String = row.get("category");
        let priority: String = row.get("priority");

        Ok(Reminder {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            barcode: row.get("barcode"),
            expiry_date: row.get("expiry_date"),
            category: category.parse().map_err(AppError::InternalServerError)?,
            priority: priority.parse().map_err(AppError::InternalServerError)?,
            is_completed: row.get("is_completed"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}
