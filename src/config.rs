//! Config handling

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_EXTENSION, DEFAULT_GRAYSCALE_DIR, DEFAULT_IMAGES_DIR,
    DEFAULT_KEY_FILE, DEFAULT_MAX_CYCLES, DEFAULT_MODEL, DEFAULT_PROBE_TIMEOUT,
};
use crate::harvest::UrlFilter;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("ureq", LevelFilter::Warn)
            .with_module_level("ureq_proto", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Everything the pipeline needs to know about where to talk to and where to write.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the model collection, eg `https://generativelanguage.googleapis.com/v1beta/models`
    pub api_base: String,
    /// Text model name
    pub model: String,
    /// File holding the API key
    pub key_file: PathBuf,
    /// Downloaded images go here
    pub images_dir: PathBuf,
    /// Grayscale copies go here
    pub grayscale_dir: PathBuf,
    /// Extension for both output files, without the dot
    pub extension: String,
    /// Timeout for each liveness probe
    pub probe_timeout: Duration,
    /// Upper bound on generate/extract cycles
    pub max_cycles: NonZeroU32,
    /// How candidate lines are picked out of the extraction output
    pub url_filter: UrlFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            grayscale_dir: PathBuf::from(DEFAULT_GRAYSCALE_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_cycles: NonZeroU32::new(DEFAULT_MAX_CYCLES).unwrap_or(NonZeroU32::MIN),
            url_filter: UrlFilter::default(),
        }
    }
}

impl From<&CliOptions> for Config {
    fn from(cli: &CliOptions) -> Self {
        Self {
            api_base: cli.api_base.clone(),
            model: cli.model.clone(),
            key_file: cli.key_file.clone(),
            images_dir: cli.images_dir.clone(),
            grayscale_dir: cli.grayscale_dir.clone(),
            extension: cli.extension.trim_start_matches('.').to_string(),
            probe_timeout: Duration::from_secs(cli.probe_timeout),
            max_cycles: cli.max_cycles,
            url_filter: if cli.strict_urls {
                UrlFilter::Strict
            } else {
                UrlFilter::Substring
            },
        }
    }
}

impl Config {
    /// Path of the downloaded image for a 1-based ordinal.
    pub fn image_path(&self, ordinal: usize) -> PathBuf {
        ordinal_path(&self.images_dir, ordinal, &self.extension)
    }

    /// Path of the grayscale copy for a 1-based ordinal.
    pub fn grayscale_path(&self, ordinal: usize) -> PathBuf {
        ordinal_path(&self.grayscale_dir, ordinal, &self.extension)
    }
}

fn ordinal_path(dir: &Path, ordinal: usize, extension: &str) -> PathBuf {
    dir.join(format!("{ordinal}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn output_paths_use_ordinals() {
        let config = Config::default();
        assert_eq!(config.image_path(1), PathBuf::from("images/1.jpg"));
        assert_eq!(config.grayscale_path(12), PathBuf::from("gs-images/12.jpg"));
    }

    #[test]
    fn cli_flags_reach_config() {
        let cli = CliOptions::try_parse_from([
            "grayharvest",
            "4",
            "--extension",
            ".png",
            "--probe-timeout",
            "2",
            "--strict-urls",
            "--images-dir",
            "/tmp/in",
        ])
        .expect("parse cli");
        let config = Config::from(&cli);
        assert_eq!(config.extension, "png");
        assert_eq!(config.probe_timeout, Duration::from_secs(2));
        assert_eq!(config.url_filter, UrlFilter::Strict);
        assert_eq!(config.image_path(3), PathBuf::from("/tmp/in/3.png"));
    }
}
