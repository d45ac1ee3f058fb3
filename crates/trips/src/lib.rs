use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use wayfarer_catalog::{AssetBundle, CatalogStats, PoiCatalog};
use wayfarer_core::{plan_itinerary, ItineraryResult, PlanContext, TripPlanRequest};
use wayfarer_ml::MlStack;
use wayfarer_observability::AppMetrics;
use wayfarer_storage::{TripRecord, TripRepository};

#[derive(Debug, Clone, Serialize)]
pub struct SavedTrip {
    pub trip_id: String,
    #[serde(flatten)]
    pub result: ItineraryResult,
}

/// Orchestration seam: owns the shared read-only snapshot (catalog,
/// encoders, scaler, scoring backend) and wires planning to metrics,
/// logging, and persistence. Every plan call builds its own mutable
/// state, so the service is freely shareable across tasks.
#[derive(Clone)]
pub struct TripService<S>
where
    S: TripRepository,
{
    catalog: Arc<PoiCatalog>,
    encoders: Arc<wayfarer_core::CategoricalEncoders>,
    scaler: Arc<wayfarer_core::FeatureScaler>,
    ml_stack: MlStack,
    store: Arc<S>,
    metrics: Arc<AppMetrics>,
}

impl<S> TripService<S>
where
    S: TripRepository,
{
    pub fn new(bundle: AssetBundle, ml_stack: MlStack, store: Arc<S>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            catalog: Arc::new(bundle.catalog),
            encoders: Arc::new(bundle.encoders),
            scaler: Arc::new(bundle.scaler),
            ml_stack,
            store,
            metrics,
        }
    }

    #[instrument(skip(self, request), fields(location = %request.location, days = request.days))]
    pub async fn plan_trip(&self, request: TripPlanRequest) -> Result<SavedTrip> {
        let started = Instant::now();
        self.metrics.inc_plan();

        let ctx = PlanContext {
            pois: self.catalog.pois(),
            encoders: self.encoders.as_ref(),
            scaler: self.scaler.as_ref(),
            backend: self.ml_stack.backend.as_deref(),
        };
        let outcome = plan_itinerary(&ctx, &request);

        if self.ml_stack.backend.is_some() {
            self.metrics.inc_ml_inference();
        }
        if let Some(reason) = &outcome.backend_error {
            self.metrics.inc_fallback();
            warn!(reason = %reason, "scoring backend failed, heuristic ranking used");
        }

        let placed = outcome.result.total_pois();
        self.metrics.add_placed(placed);
        self.metrics.add_dropped(outcome.dropped_pois);

        let trip_id = Uuid::new_v4().to_string();
        if placed > 0 {
            let record = TripRecord::from_result(&trip_id, &outcome.result)?;
            self.store.save_trip(&record).await?;
        }

        self.metrics.observe_latency(started.elapsed());
        info!(
            trip_id = %trip_id,
            scorer = outcome.scorer,
            candidates = outcome.candidates_considered,
            placed,
            dropped = outcome.dropped_pois,
            persisted = placed > 0,
            "itinerary planned"
        );

        Ok(SavedTrip {
            trip_id,
            result: outcome.result,
        })
    }

    pub async fn list_trips(&self) -> Result<Vec<TripRecord>> {
        self.store.list_trips().await
    }

    pub async fn load_trip(&self, trip_id: &str) -> Result<Option<TripRecord>> {
        self.store.load_trip(trip_id).await
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Result<bool> {
        self.store.delete_trip(trip_id).await
    }

    pub fn catalog_stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    pub fn scoring_model(&self) -> &'static str {
        self.ml_stack.model_name()
    }
}
