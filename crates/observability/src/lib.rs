use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    plans_total: AtomicU64,
    ml_inference_total: AtomicU64,
    fallback_total: AtomicU64,
    pois_placed_total: AtomicU64,
    pois_dropped_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub plans_total: u64,
    pub ml_inference_total: u64,
    pub fallback_total: u64,
    pub pois_placed_total: u64,
    pub pois_dropped_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_plan(&self) {
        self.plans_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ml_inference(&self) {
        self.ml_inference_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_placed(&self, placed: usize) {
        self.pois_placed_total
            .fetch_add(placed as u64, Ordering::Relaxed);
    }

    pub fn add_dropped(&self, dropped: usize) {
        self.pois_dropped_total
            .fetch_add(dropped as u64, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let plans = self.plans_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            plans_total: plans,
            ml_inference_total: self.ml_inference_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            pois_placed_total: self.pois_placed_total.load(Ordering::Relaxed),
            pois_dropped_total: self.pois_dropped_total.load(Ordering::Relaxed),
            avg_latency_millis: if plans == 0 {
                0.0
            } else {
                latency as f64 / plans as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,wayfarer_api=info,wayfarer_trips=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
