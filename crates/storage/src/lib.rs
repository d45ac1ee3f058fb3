use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use wayfarer_core::ItineraryResult;

/// Flattened persisted form of a finished plan. The full day-by-day
/// itinerary rides along as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub trip_id: String,
    pub location: String,
    pub days: u32,
    pub budget: String,
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub total_cost: f64,
    pub total_hours: f64,
    pub itinerary_json: String,
}

impl TripRecord {
    pub fn from_result(trip_id: &str, result: &ItineraryResult) -> Result<Self> {
        Ok(Self {
            trip_id: trip_id.to_string(),
            location: result.metadata.location.clone(),
            days: result.metadata.days,
            budget: result.metadata.budget.clone(),
            generated_at: result.metadata.generated_at,
            summary: result.summary.clone(),
            total_cost: result.totals.cost,
            total_hours: result.totals.hours,
            itinerary_json: serde_json::to_string(result)
                .context("failed serializing itinerary for storage")?,
        })
    }

    pub fn itinerary(&self) -> Result<ItineraryResult> {
        serde_json::from_str(&self.itinerary_json)
            .context("failed deserializing stored itinerary")
    }
}

pub trait TripRepository: Send + Sync {
    async fn save_trip(&self, record: &TripRecord) -> Result<()>;
    async fn load_trip(&self, trip_id: &str) -> Result<Option<TripRecord>>;
    /// Newest first.
    async fn list_trips(&self) -> Result<Vec<TripRecord>>;
    async fn delete_trip(&self, trip_id: &str) -> Result<bool>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    trips: Arc<RwLock<HashMap<String, TripRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripRepository for MemoryStore {
    async fn save_trip(&self, record: &TripRecord) -> Result<()> {
        self.trips
            .write()
            .insert(record.trip_id.clone(), record.clone());
        Ok(())
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Option<TripRecord>> {
        Ok(self.trips.read().get(trip_id).cloned())
    }

    async fn list_trips(&self) -> Result<Vec<TripRecord>> {
        let mut trips: Vec<TripRecord> = self.trips.read().values().cloned().collect();
        trips.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(trips)
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<bool> {
        Ok(self.trips.write().remove(trip_id).is_some())
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("failed connecting to sqlite at {}", database_url))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trips (
              trip_id TEXT PRIMARY KEY,
              location TEXT NOT NULL,
              days INTEGER NOT NULL,
              budget TEXT NOT NULL,
              generated_at TEXT NOT NULL,
              summary TEXT NOT NULL,
              total_cost REAL NOT NULL,
              total_hours REAL NOT NULL,
              itinerary_json TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> TripRecord {
        TripRecord {
            trip_id: row.get("trip_id"),
            location: row.get("location"),
            days: row.get::<i64, _>("days").max(0) as u32,
            budget: row.get("budget"),
            generated_at: row
                .get::<String, _>("generated_at")
                .parse()
                .unwrap_or_else(|_| Utc::now()),
            summary: row.get("summary"),
            total_cost: row.get("total_cost"),
            total_hours: row.get("total_hours"),
            itinerary_json: row.get("itinerary_json"),
        }
    }
}

impl TripRepository for SqliteStore {
    async fn save_trip(&self, record: &TripRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trips
              (trip_id, location, days, budget, generated_at, summary,
               total_cost, total_hours, itinerary_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(trip_id) DO UPDATE SET
              location=excluded.location,
              days=excluded.days,
              budget=excluded.budget,
              generated_at=excluded.generated_at,
              summary=excluded.summary,
              total_cost=excluded.total_cost,
              total_hours=excluded.total_hours,
              itinerary_json=excluded.itinerary_json
            "#,
        )
        .bind(&record.trip_id)
        .bind(&record.location)
        .bind(i64::from(record.days))
        .bind(&record.budget)
        .bind(record.generated_at.to_rfc3339())
        .bind(&record.summary)
        .bind(record.total_cost)
        .bind(record.total_hours)
        .bind(&record.itinerary_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Option<TripRecord>> {
        let row = sqlx::query("SELECT * FROM trips WHERE trip_id = ?1")
            .bind(trip_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::record_from_row))
    }

    async fn list_trips(&self) -> Result<Vec<TripRecord>> {
        let rows = sqlx::query("SELECT * FROM trips ORDER BY generated_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::record_from_row).collect())
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE trip_id = ?1")
            .bind(trip_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn sqlite(database_url: &str) -> Result<Self> {
        let sqlite = SqliteStore::connect(database_url).await?;
        Ok(Self::Sqlite(sqlite))
    }
}

impl TripRepository for Store {
    async fn save_trip(&self, record: &TripRecord) -> Result<()> {
        match self {
            Store::Memory(store) => store.save_trip(record).await,
            Store::Sqlite(store) => store.save_trip(record).await,
        }
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Option<TripRecord>> {
        match self {
            Store::Memory(store) => store.load_trip(trip_id).await,
            Store::Sqlite(store) => store.load_trip(trip_id).await,
        }
    }

    async fn list_trips(&self) -> Result<Vec<TripRecord>> {
        match self {
            Store::Memory(store) => store.list_trips().await,
            Store::Sqlite(store) => store.list_trips().await,
        }
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<bool> {
        match self {
            Store::Memory(store) => store.delete_trip(trip_id).await,
            Store::Sqlite(store) => store.delete_trip(trip_id).await,
        }
    }
}
