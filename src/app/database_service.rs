//! The car data service.
//!
//! This module is the only place that talks to MongoDB. Each public method is
//! one operation of the HTTP surface: a single driver call (two for create,
//! which re-reads the inserted document, and for list, which also counts).
//! Consistency is delegated to the store's single-document atomicity; there
//! are no retries and no multi-document coordination.

use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

use crate::domain::car::{CarInput, CarRecord, CarUpdate};
use crate::domain::error::{CarStoreError, CarStoreResult};
use crate::infra::config::Settings;

pub const CARS_COLLECTION: &str = "cars";

/// The main service that owns the MongoDB connection for the process.
///
/// Built once at startup and threaded through request handling; the driver's
/// `Client` pools connections internally, so the service is shared behind an
/// `Arc` without extra locking.
pub struct DatabaseService {
    client: Client,
    database: Database,
    cars: Collection<CarRecord>,
}

impl DatabaseService {
    /// Connects to the database named in `settings`.
    ///
    /// A ping is attempted so misconfigured deployments show up in the logs
    /// immediately; the driver connects lazily, so an unreachable store is
    /// reported but does not abort startup (the health endpoint keeps
    /// tracking it).
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&settings.db_url).await?;
        let database = client.database(&settings.db_name);

        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => tracing::info!(db_name = %settings.db_name, "connected to MongoDB"),
            Err(err) => tracing::warn!(error = %err, "MongoDB ping failed at startup"),
        }

        let cars = database.collection(CARS_COLLECTION);
        Ok(Self {
            client,
            database,
            cars,
        })
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> CarStoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Validates, normalizes and inserts a new car, then re-reads the stored
    /// document so the caller gets exactly what was persisted.
    pub async fn insert_car(&self, input: CarInput) -> CarStoreResult<CarRecord> {
        let record = CarRecord::from_input(input)?;
        let inserted = self.cars.insert_one(&record).await?;
        let id = inserted.inserted_id.as_object_id().unwrap_or(record.id);
        self.find_car(id).await
    }

    pub async fn find_car(&self, id: ObjectId) -> CarStoreResult<CarRecord> {
        self.cars
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| CarStoreError::NotFound(id.to_hex()))
    }

    /// Returns one page of cars sorted by brand (identifier as tiebreak) and
    /// whether further pages exist. `page` is 1-based; the caller clamps it.
    pub async fn list_cars(&self, page: u64, limit: i64) -> CarStoreResult<(Vec<CarRecord>, bool)> {
        let skip = page.saturating_sub(1).saturating_mul(limit as u64);
        let records: Vec<CarRecord> = self
            .cars
            .find(doc! {})
            .sort(doc! { "brand": 1, "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        let total = self.cars.count_documents(doc! {}).await?;
        Ok((records, has_more(total, page, limit)))
    }

    /// Merges the supplied fields into an existing car atomically and returns
    /// the post-update document. An empty update is a plain read: the
    /// existing record is returned without issuing a write.
    pub async fn update_car(&self, id: ObjectId, update: &CarUpdate) -> CarStoreResult<CarRecord> {
        if update.is_empty() {
            return self.find_car(id).await;
        }

        self.cars
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update.to_set_document() })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| CarStoreError::NotFound(id.to_hex()))
    }

    /// Removes exactly one car.
    pub async fn delete_car(&self, id: ObjectId) -> CarStoreResult<()> {
        let result = self.cars.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 1 {
            Ok(())
        } else {
            Err(CarStoreError::NotFound(id.to_hex()))
        }
    }

    /// Tears down the connection pool. Called once on graceful shutdown.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

fn has_more(total: u64, page: u64, limit: i64) -> bool {
    total > page.saturating_mul(limit as u64)
}
