use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One regional pharmacy dataset listed in `regions.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Dataset file, relative to the manifest's directory unless absolute.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

impl RegionsFile {
    /// Dataset paths resolved against `base_dir`, in manifest order.
    #[must_use]
    pub fn dataset_paths(&self, base_dir: &Path) -> Vec<(String, PathBuf)> {
        self.regions
            .iter()
            .map(|region| (region.name.clone(), base_dir.join(&region.path)))
            .collect()
    }
}

/// Load and validate the regions manifest from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions_file: RegionsFile = serde_yaml::from_str(&content)?;

    validate_regions(&regions_file)?;

    Ok(regions_file)
}

fn validate_regions(regions_file: &RegionsFile) -> Result<(), ConfigError> {
    if regions_file.regions.is_empty() {
        return Err(ConfigError::Validation(
            "at least one region must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for region in &regions_file.regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }

        if region.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!(
                "region '{}' has an empty dataset path",
                region.name
            )));
        }

        if !seen_names.insert(region.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name: '{}'",
                region.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, path: &str) -> RegionConfig {
        RegionConfig {
            name: name.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn validate_rejects_empty_manifest() {
        let regions_file = RegionsFile { regions: vec![] };
        let err = validate_regions(&regions_file).unwrap_err();
        assert!(err.to_string().contains("at least one region"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let regions_file = RegionsFile {
            regions: vec![region("  ", "chungbuk.json")],
        };
        let err = validate_regions(&regions_file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_empty_path() {
        let regions_file = RegionsFile {
            regions: vec![region("chungbuk", "")],
        };
        let err = validate_regions(&regions_file).unwrap_err();
        assert!(err.to_string().contains("empty dataset path"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let regions_file = RegionsFile {
            regions: vec![
                region("ChungBuk", "chungbuk.json"),
                region("chungbuk", "chungbuk-2.json"),
            ],
        };
        let err = validate_regions(&regions_file).unwrap_err();
        assert!(err.to_string().contains("duplicate region name"));
    }

    #[test]
    fn validate_accepts_valid_regions() {
        let regions_file = RegionsFile {
            regions: vec![
                region("chungbuk", "chungbuk.json"),
                region("chungnam", "chungnam.json"),
            ],
        };
        assert!(validate_regions(&regions_file).is_ok());
    }

    #[test]
    fn dataset_paths_resolve_against_base_dir() {
        let regions_file = RegionsFile {
            regions: vec![
                region("chungbuk", "chungbuk.json"),
                region("abs", "/srv/data/abs.json"),
            ],
        };
        let paths = regions_file.dataset_paths(Path::new("/etc/pharmap"));
        assert_eq!(paths[0].1, PathBuf::from("/etc/pharmap/chungbuk.json"));
        assert_eq!(paths[1].1, PathBuf::from("/srv/data/abs.json"));
    }

    #[test]
    fn load_regions_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("regions.yaml");
        assert!(
            path.exists(),
            "regions.yaml missing at {path:?}; required for this test"
        );
        let result = load_regions(&path);
        assert!(result.is_ok(), "failed to load regions.yaml: {result:?}");
        assert_eq!(result.unwrap().regions.len(), 2);
    }

    #[test]
    fn load_regions_reports_missing_file() {
        let err = load_regions(Path::new("/nonexistent/regions.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::RegionsFileIo { .. }));
    }
}
