mod seed;
mod thumbnails;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;
use wayfarer_core::scorer::ScaledFeature;
use wayfarer_core::{CategoricalEncoders, CostTier, FeatureScaler, Poi, PoiExtras};

pub use thumbnails::thumbnail_slug;

pub const POIS_FILE: &str = "pois.csv";
pub const ENCODERS_FILE: &str = "encoders.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Read-only POI snapshot, loaded once and shared for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct PoiCatalog {
    pois: Vec<Poi>,
    skipped_rows: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogStats {
    pub pois_loaded: usize,
    pub distinct_cities: usize,
    pub skipped_rows: usize,
}

impl PoiCatalog {
    pub fn new(pois: Vec<Poi>) -> Self {
        Self {
            pois,
            skipped_rows: 0,
        }
    }

    /// Built-in landmark catalog used when no asset file is available.
    pub fn seed() -> Self {
        Self::new(seed::seed_pois())
    }

    /// Parse a POI CSV, denormalizing the storage-side scaled cost and
    /// duration columns. Malformed rows are skipped with a warning;
    /// only an unreadable file is an error.
    pub fn from_csv_file(path: impl AsRef<Path>, scaler: &FeatureScaler) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading poi catalog at {}", path.display()))?;

        let mut pois = Vec::new();
        let mut skipped_rows = 0usize;

        for (idx, line) in raw.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            match parse_row(line, idx, scaler) {
                Ok(poi) => pois.push(poi),
                Err(err) => {
                    skipped_rows += 1;
                    warn!(line = idx + 1, error = %err, "skipping malformed poi row");
                }
            }
        }

        Ok(Self { pois, skipped_rows })
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let cities: HashSet<&str> = self.pois.iter().map(|poi| poi.city.as_str()).collect();
        CatalogStats {
            pois_loaded: self.pois.len(),
            distinct_cities: cities.len(),
            skipped_rows: self.skipped_rows,
        }
    }
}

/// Catalog plus the feature-encoding tables that were trained with it.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub catalog: PoiCatalog,
    pub encoders: CategoricalEncoders,
    pub scaler: FeatureScaler,
}

/// Load the asset directory, degrading piecewise to built-in defaults:
/// a missing or broken file logs a warning and falls back, it never
/// takes the process down.
pub fn load_bundle(dir: impl AsRef<Path>) -> AssetBundle {
    let dir = dir.as_ref();

    let scaler = match load_scaler(dir.join(SCALER_FILE)) {
        Ok(scaler) => scaler,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "using default feature scaler");
            FeatureScaler::default()
        }
    };

    let encoders = match load_encoders(dir.join(ENCODERS_FILE)) {
        Ok(encoders) => encoders,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "using default encoders");
            CategoricalEncoders::default()
        }
    };

    let catalog = match PoiCatalog::from_csv_file(dir.join(POIS_FILE), &scaler) {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!("poi catalog file is empty, using seed catalog");
            PoiCatalog::seed()
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "using seed catalog");
            PoiCatalog::seed()
        }
    };

    AssetBundle {
        catalog,
        encoders,
        scaler,
    }
}

fn parse_row(line: &str, idx: usize, scaler: &FeatureScaler) -> Result<Poi> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    anyhow::ensure!(fields.len() >= 10, "expected 10 columns, got {}", fields.len());

    let city = fields[0].to_string();
    let region = fields[1].to_string();
    let name = fields[2].to_string();
    let category = fields[3].to_string();
    let latitude: f64 = fields[4].parse().context("bad latitude")?;
    let longitude: f64 = fields[5].parse().context("bad longitude")?;
    let cost_scaled: f64 = fields[6].parse().context("bad scaled cost")?;
    let hours_scaled: f64 = fields[7].parse().context("bad scaled hours")?;
    let popularity: f64 = fields[8].parse().context("bad popularity")?;
    let cost_tier =
        CostTier::parse(fields[9]).with_context(|| format!("unknown cost tier {:?}", fields[9]))?;

    let estimated_cost = scaler.cost.denormalize(cost_scaled).max(0.0);
    let duration_hours = scaler.hours.denormalize(hours_scaled).max(0.1);

    Ok(Poi {
        id: format!("poi-{idx:04}"),
        extras: PoiExtras {
            thumbnail: Some(thumbnail_slug(&category).to_string()),
            ..PoiExtras::default()
        },
        name,
        category,
        city,
        region,
        latitude,
        longitude,
        estimated_cost,
        duration_hours,
        popularity: popularity.clamp(0.0, 1.0),
        cost_tier,
    })
}

#[derive(Debug, Deserialize)]
struct EncoderClasses {
    classes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EncodersFile {
    city: EncoderClasses,
    budget: EncoderClasses,
    cost_tier: EncoderClasses,
    category: EncoderClasses,
}

fn load_encoders(path: impl AsRef<Path>) -> Result<CategoricalEncoders> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading encoders at {}", path.display()))?;
    let parsed: EncodersFile = serde_json::from_str(&raw).context("invalid encoders json")?;

    fn index_map(classes: Vec<String>) -> HashMap<String, u32> {
        classes
            .into_iter()
            .enumerate()
            .map(|(idx, class)| (class, idx as u32))
            .collect()
    }

    Ok(CategoricalEncoders {
        city: index_map(parsed.city.classes),
        budget: index_map(parsed.budget.classes),
        cost_tier: index_map(parsed.cost_tier.classes),
        category: index_map(parsed.category.classes),
    })
}

#[derive(Debug, Deserialize)]
struct ScalerFile {
    cols: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

fn load_scaler(path: impl AsRef<Path>) -> Result<FeatureScaler> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading scaler at {}", path.display()))?;
    let parsed: ScalerFile = serde_json::from_str(&raw).context("invalid scaler json")?;
    anyhow::ensure!(
        parsed.cols.len() == parsed.mean.len() && parsed.cols.len() == parsed.scale.len(),
        "scaler cols/mean/scale lengths differ"
    );

    let mut scaler = FeatureScaler::default();
    for (idx, col) in parsed.cols.iter().enumerate() {
        let entry = ScaledFeature {
            mean: parsed.mean[idx],
            scale: parsed.scale[idx],
        };
        match col.as_str() {
            "cost" => scaler.cost = entry,
            "hours" => scaler.hours = entry,
            "distance_km" => scaler.distance_km = entry,
            other => warn!(col = other, "ignoring unknown scaler column"),
        }
    }

    Ok(scaler)
}
