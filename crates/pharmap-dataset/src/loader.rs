use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pharmap_core::{PharmacyRecord, RegionsFile};

use crate::error::DatasetError;
use crate::normalize::normalize_record;
use crate::types::RawPharmacyRecord;

/// Per-region load statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub name: String,
    pub path: PathBuf,
    pub records: usize,
}

/// All pharmacy records from every configured region, in manifest order
/// and then file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PharmacyRecord>,
    regions: Vec<RegionSummary>,
}

impl Dataset {
    #[must_use]
    pub fn from_records(records: Vec<PharmacyRecord>) -> Self {
        Self {
            records,
            regions: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PharmacyRecord] {
        &self.records
    }

    #[must_use]
    pub fn regions(&self) -> &[RegionSummary] {
        &self.regions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load every dataset listed in the regions manifest.
///
/// Dataset paths are resolved against `base_dir` (normally the directory
/// holding `regions.yaml`).
///
/// # Errors
///
/// Returns the first [`DatasetError`] encountered; no partial dataset is
/// returned.
pub fn load_regional_datasets(
    regions: &RegionsFile,
    base_dir: &Path,
) -> Result<Dataset, DatasetError> {
    let mut dataset = Dataset::default();

    for (name, path) in regions.dataset_paths(base_dir) {
        let records = load_dataset_file(&path)?;
        tracing::info!(
            region = %name,
            path = %path.display(),
            records = records.len(),
            "loaded regional pharmacy dataset"
        );
        dataset.regions.push(RegionSummary {
            name,
            path,
            records: records.len(),
        });
        dataset.records.extend(records);
    }

    report_schedule_anomalies(&dataset.records);

    Ok(dataset)
}

/// Load and validate a single regional dataset file.
///
/// Accepts either `{"DATA": [...]}` or a bare JSON array of records.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read, is not JSON, has an
/// unexpected shape, or contains an invalid record.
pub fn load_dataset_file(path: &Path) -> Result<Vec<PharmacyRecord>, DatasetError> {
    let display = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: display.clone(),
        source: e,
    })?;

    let document: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| DatasetError::Json {
            path: display.clone(),
            source: e,
        })?;

    let rows = match document {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(mut map) => match map.remove("DATA") {
            Some(serde_json::Value::Array(rows)) => rows,
            Some(_) => {
                return Err(DatasetError::Shape {
                    path: display,
                    reason: "\"DATA\" is not an array".to_string(),
                })
            }
            None => {
                return Err(DatasetError::Shape {
                    path: display,
                    reason: "missing \"DATA\" array".to_string(),
                })
            }
        },
        _ => {
            return Err(DatasetError::Shape {
                path: display,
                reason: "expected an object or an array at the top level".to_string(),
            })
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let raw: RawPharmacyRecord =
                serde_json::from_value(row).map_err(|e| DatasetError::Record {
                    path: display.clone(),
                    index,
                    source: e,
                })?;
            normalize_record(raw, &display)
        })
        .collect()
}

/// Warn about schedules that close before they open and about ids repeated
/// across regions.
fn report_schedule_anomalies(records: &[PharmacyRecord]) {
    let midnight_crossing = records
        .iter()
        .flat_map(|r| r.hours.iter())
        .filter(|(_, hours)| hours.is_some_and(|h| h.crosses_midnight()))
        .count();
    if midnight_crossing > 0 {
        tracing::warn!(
            schedules = midnight_crossing,
            "dataset has schedules closing before they open; they never report open"
        );
    }

    let mut seen = HashSet::new();
    let duplicates = records.iter().filter(|r| !seen.insert(r.id.as_str())).count();
    if duplicates > 0 {
        tracing::warn!(duplicates, "dataset has repeated pharmacy ids");
    }
}
