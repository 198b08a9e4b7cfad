//! Command handlers.
//!
//! Each handler loads what it needs from config, runs at most one refresh,
//! and returns the text to print. Failures propagate to `main`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use pharmap_core::{AppConfig, Coordinate};
use pharmap_dataset::Dataset;
use pharmap_locator::{
    ConfiguredGeolocator, Favorites, FileKeyValueStore, RefreshPipeline, ResultSet,
};

use crate::output;

/// Load every regional dataset named in the configured manifest.
///
/// Any unreadable or malformed dataset aborts the run.
pub(crate) fn load_dataset(config: &AppConfig) -> anyhow::Result<Dataset> {
    let manifest = pharmap_core::load_regions(&config.regions_path).with_context(|| {
        format!(
            "failed to load regions manifest {}",
            config.regions_path.display()
        )
    })?;
    let base_dir = config
        .regions_path
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let dataset = pharmap_dataset::load_regional_datasets(&manifest, base_dir)?;
    tracing::info!(
        regions = dataset.regions().len(),
        records = dataset.len(),
        "pharmacy dataset ready"
    );
    Ok(dataset)
}

fn geolocator(config: &AppConfig, position: Option<Coordinate>) -> ConfiguredGeolocator {
    let configured = ConfiguredGeolocator::from_config(config);
    match position {
        Some(position) => configured.with_position(position),
        None => configured,
    }
}

async fn load_favorites(config: &AppConfig) -> anyhow::Result<Favorites<FileKeyValueStore>> {
    let store = FileKeyValueStore::new(&config.favorites_path);
    Favorites::load(store).await.with_context(|| {
        format!(
            "failed to read favorites from {}",
            config.favorites_path.display()
        )
    })
}

/// Run one refresh and return the published result set.
async fn refresh(
    config: &AppConfig,
    keyword: &str,
    position: Option<Coordinate>,
) -> anyhow::Result<Arc<ResultSet>> {
    let dataset = Arc::new(load_dataset(config)?);
    let pipeline = RefreshPipeline::new(dataset, geolocator(config, position));
    let reader = pipeline.reader();

    if let Err(e) = pipeline.refresh(keyword).await {
        tracing::error!(error = %e, "could not refresh nearby pharmacies");
        return Err(e).context("nearby pharmacies are unavailable without a device position");
    }
    Ok(reader.snapshot())
}

pub(crate) async fn run_search(
    config: &AppConfig,
    keyword: &str,
    position: Option<Coordinate>,
    json: bool,
) -> anyhow::Result<String> {
    let results = refresh(config, keyword, position).await?;
    if json {
        return output::format_json(&results);
    }
    let favorites = load_favorites(config).await?;
    let shown: Vec<_> = results.pharmacies.iter().collect();
    Ok(output::format_list(
        &shown,
        |id| favorites.is_favorite(id),
        output::NO_RESULTS,
    ))
}

pub(crate) async fn run_map(
    config: &AppConfig,
    position: Option<Coordinate>,
) -> anyhow::Result<String> {
    let results = refresh(config, "", position).await?;
    Ok(output::format_markers(&results))
}

pub(crate) async fn run_favorites(
    config: &AppConfig,
    position: Option<Coordinate>,
) -> anyhow::Result<String> {
    let favorites = load_favorites(config).await?;
    if favorites.is_empty() {
        return Ok(output::NO_FAVORITES.to_string());
    }
    let results = refresh(config, "", position).await?;
    let shown = favorites.filter(&results.pharmacies);
    Ok(output::format_list(
        &shown,
        |_| true,
        output::NO_FAVORITES_NEARBY,
    ))
}

pub(crate) async fn run_toggle_favorite(config: &AppConfig, id: &str) -> anyhow::Result<String> {
    let mut favorites = load_favorites(config).await?;
    let now_favorite = favorites
        .toggle(id)
        .await
        .with_context(|| format!("failed to update favorite {id}"))?;
    Ok(output::format_toggle(id, now_favorite))
}

pub(crate) async fn run_call(
    config: &AppConfig,
    id: &str,
    position: Option<Coordinate>,
) -> anyhow::Result<String> {
    let results = refresh(config, "", position).await?;
    let pharmacy = results
        .find(id)
        .ok_or_else(|| anyhow::anyhow!("pharmacy '{id}' is not among nearby pharmacies"))?;
    output::tel_uri(&pharmacy.phone)
        .ok_or_else(|| anyhow::anyhow!("pharmacy '{id}' has no phone number"))
}
