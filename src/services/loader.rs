use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Colour, Feature, FeatureFlags, Product, ProductId, SimilarityMatrix, Snapshot},
};

/// Source of the catalog/similarity snapshot served for a session
///
/// Loading happens once before the server accepts requests; the resulting
/// snapshot is shared read-only between all requests.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> AppResult<Snapshot>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Loads a snapshot from a source and logs what was loaded
pub async fn load_snapshot(source: &dyn SnapshotSource) -> AppResult<Arc<Snapshot>> {
    tracing::info!(source = source.name(), "Loading catalog snapshot");

    let snapshot = source.load().await.map_err(|e| {
        tracing::error!(source = source.name(), error = %e, "Snapshot load failed");
        e
    })?;

    tracing::info!(
        source = source.name(),
        products = snapshot.catalog.len(),
        loaded_at = %snapshot.loaded_at,
        "Catalog snapshot loaded"
    );

    Ok(Arc::new(snapshot))
}

/// Reads the catalog and similarity matrix from two CSV files
#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    catalog_path: PathBuf,
    similarity_path: PathBuf,
}

impl CsvSnapshotSource {
    pub fn new(catalog_path: impl Into<PathBuf>, similarity_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            similarity_path: similarity_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for CsvSnapshotSource {
    async fn load(&self) -> AppResult<Snapshot> {
        let catalog_path = self.catalog_path.clone();
        let similarity_path = self.similarity_path.clone();

        tokio::task::spawn_blocking(move || {
            let catalog = read_catalog(&catalog_path)?;
            let similarity = read_similarity_matrix(&similarity_path)?;
            Snapshot::new(catalog, similarity)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

/// Header names are matched case-insensitively with spaces read as underscores,
/// so both `battery_life` and `Battery Life` resolve to the same column.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

struct CatalogColumns {
    product_id: usize,
    rating: usize,
    price: usize,
    battery_life: usize,
    features: Vec<(Feature, usize)>,
    colours: Vec<(Colour, usize)>,
}

impl CatalogColumns {
    fn resolve(headers: &StringRecord) -> AppResult<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                AppError::Validation(format!("catalog is missing required column '{}'", name))
            })
        };

        let features = Feature::ALL
            .iter()
            .filter_map(|f| find(f.column()).map(|idx| (*f, idx)))
            .collect();

        let mut colours = Vec::new();
        for (idx, name) in names.iter().enumerate() {
            let Some(suffix) = name
                .strip_prefix("colour_")
                .or_else(|| name.strip_prefix("color_"))
            else {
                continue;
            };
            let colour = match suffix.parse::<Colour>() {
                Ok(colour) => colour,
                // Frequent CSS4 colours outside the closed set keep their own column
                Err(_) if Colour::is_css4_name(suffix) => {
                    tracing::warn!(column = %name, "Folding colour column into 'other'");
                    Colour::Other
                }
                Err(e) => {
                    return Err(AppError::Validation(format!(
                        "catalog column '{}': {}",
                        name, e
                    )))
                }
            };
            colours.push((colour, idx));
        }
        if colours.is_empty() {
            return Err(AppError::Validation(
                "catalog has no colour_<name> columns".to_string(),
            ));
        }

        Ok(Self {
            product_id: require("product_id")?,
            rating: require("rating")?,
            price: require("price")?,
            battery_life: require("battery_life")?,
            features,
            colours,
        })
    }
}

/// Reads a catalog CSV with a header row
pub fn read_catalog(path: &Path) -> AppResult<Catalog> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let columns = CatalogColumns::resolve(reader.headers()?)?;

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        products.push(parse_product(&record, &columns, line)?);
    }

    tracing::debug!(path = %path.display(), rows = products.len(), "Read catalog file");
    Catalog::new(products)
}

fn parse_product(record: &StringRecord, columns: &CatalogColumns, line: u64) -> AppResult<Product> {
    let field = |idx: usize, name: &str| {
        record.get(idx).ok_or_else(|| {
            AppError::Validation(format!("line {}: missing value for '{}'", line, name))
        })
    };
    let number = |idx: usize, name: &str| -> AppResult<f64> {
        let raw = field(idx, name)?;
        raw.parse::<f64>().map_err(|_| {
            AppError::Validation(format!("line {}: '{}' is not a number for '{}'", line, raw, name))
        })
    };

    let product_id = field(columns.product_id, "product_id")?;
    if product_id.is_empty() {
        return Err(AppError::Validation(format!("line {}: empty product_id", line)));
    }
    let product_id = ProductId::new(product_id);

    let battery_hours = number(columns.battery_life, "battery_life")?;
    if battery_hours < 0.0 || battery_hours.fract() != 0.0 || battery_hours > u32::MAX as f64 {
        return Err(AppError::Validation(format!(
            "line {}: battery_life {} is not a whole number of hours",
            line, battery_hours
        )));
    }

    let mut features = FeatureFlags::default();
    for (feature, idx) in &columns.features {
        features.set(*feature, parse_flag(field(*idx, feature.column())?, line)?);
    }

    let mut colour = None;
    for (candidate, idx) in &columns.colours {
        if parse_flag(field(*idx, candidate.as_str())?, line)? {
            if let Some(previous) = colour.replace(*candidate) {
                return Err(AppError::DataIntegrity(format!(
                    "line {}: product {} has more than one colour ({} and {})",
                    line, product_id, previous, candidate
                )));
            }
        }
    }
    let colour = colour.ok_or_else(|| {
        AppError::DataIntegrity(format!("line {}: product {} has no colour flag set", line, product_id))
    })?;

    Ok(Product {
        rating: number(columns.rating, "rating")?,
        price: number(columns.price, "price")?,
        battery_life: battery_hours as u32,
        features,
        colour,
        product_id,
    })
}

fn parse_flag(raw: &str, line: u64) -> AppResult<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        other => Err(AppError::Validation(format!(
            "line {}: '{}' is not a boolean flag",
            line, other
        ))),
    }
}

/// Reads a headerless dense matrix, one catalog row per line
pub fn read_similarity_matrix(path: &Path) -> AppResult<SimilarityMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|v| {
                v.parse::<f64>().map_err(|_| {
                    AppError::Validation(format!("similarity row {}: '{}' is not a number", i, v))
                })
            })
            .collect::<AppResult<Vec<f64>>>()?;
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "Read similarity matrix file");
    SimilarityMatrix::from_rows(rows)
}
