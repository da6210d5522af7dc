//! The whole run: key, directories, harvest, then download and convert each URL.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::credential::load_credential;
use crate::download::download_image;
use crate::error::GrayHarvestError;
use crate::gemini::GeminiClient;
use crate::grayscale::convert_to_grayscale;
use crate::harvest::{HarvestReport, Harvester};
use crate::transport::Transport;

/// Counts from a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// What the harvester found
    pub harvest: HarvestReport,
    /// Images written to the images directory
    pub downloaded: usize,
    /// Grayscale copies written
    pub converted: usize,
}

/// Runs the pipeline for `count` images.
///
/// Only setup problems come back as `Err`: a missing key file (checked before
/// any network call) or an endpoint that isn't a valid URL. Everything after
/// that is logged per item and the run carries on. A failed download skips
/// the grayscale step for that item.
pub fn run(
    config: &Config,
    transport: &dyn Transport,
    count: usize,
) -> Result<RunSummary, GrayHarvestError> {
    let credential = load_credential(&config.key_file)?;

    ensure_dir(&config.images_dir);
    ensure_dir(&config.grayscale_dir);

    let gemini = GeminiClient::new(transport, &config.api_base, &config.model, &credential)?;
    let harvester = Harvester::new(&gemini, transport, config.max_cycles, config.url_filter);
    let harvest = harvester.harvest(count);

    let mut downloaded = 0;
    let mut converted = 0;
    for (ordinal, url) in (1..).zip(&harvest.urls) {
        let image_path = config.image_path(ordinal);
        if let Err(err) = fetch_item(transport, url, &image_path) {
            error!("{:#}", err);
            continue;
        }
        downloaded += 1;

        let grayscale_path = config.grayscale_path(ordinal);
        match convert_item(&image_path, &grayscale_path) {
            Ok(()) => {
                info!("Saved grayscale: {}", grayscale_path.display());
                converted += 1;
            }
            Err(err) => error!("{:#}", err),
        }
    }

    Ok(RunSummary {
        harvest,
        downloaded,
        converted,
    })
}

fn ensure_dir(dir: &Path) {
    if let Err(err) = fs::create_dir_all(dir) {
        warn!("Failed to create {}: {}", dir.display(), err);
    }
}

fn fetch_item(transport: &dyn Transport, url: &str, path: &Path) -> Result<()> {
    let bytes = download_image(transport, url, path)
        .with_context(|| format!("Failed to download {url} to {}", path.display()))?;
    info!("Downloaded: {} ({bytes} bytes)", path.display());
    Ok(())
}

fn convert_item(input: &Path, output: &Path) -> Result<()> {
    convert_to_grayscale(input, output)
        .with_context(|| format!("Unable to convert {} to grayscale", input.display()))
}
