//! CLI parser
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_EXTENSION, DEFAULT_GRAYSCALE_DIR, DEFAULT_IMAGES_DIR,
    DEFAULT_KEY_FILE, DEFAULT_MAX_CYCLES, DEFAULT_MODEL, DEFAULT_PROBE_TIMEOUT_SECONDS,
};

#[derive(Parser, Debug)]
#[command(name = "grayharvest")]
#[command(
    about = "Ask Gemini for public domain image URLs, download them and save grayscale copies"
)]
/// CLI Options
pub struct CliOptions {
    /// Number of images to fetch. Non-numeric input counts as zero.
    #[arg(value_parser = parse_count, allow_hyphen_values = true)]
    pub count: usize,

    #[clap(long, help = "Enable debug logging", env = "GRAYHARVEST_DEBUG")]
    /// Enable debug logging. Env: GRAYHARVEST_DEBUG
    pub debug: bool,

    #[clap(long, default_value = DEFAULT_KEY_FILE, env = "GRAYHARVEST_KEY_FILE")]
    /// File holding the Gemini API key on its first line, defaults to `googleai.key`.
    /// Env: GRAYHARVEST_KEY_FILE
    pub key_file: PathBuf,

    #[clap(long, default_value = DEFAULT_MODEL, env = "GRAYHARVEST_MODEL")]
    /// Text model used for both prompts.
    /// Env: GRAYHARVEST_MODEL
    pub model: String,

    #[clap(long, default_value = DEFAULT_API_BASE, env = "GRAYHARVEST_API_BASE")]
    /// Base URL of the model collection.
    /// Env: GRAYHARVEST_API_BASE
    pub api_base: String,

    #[clap(long, default_value = DEFAULT_IMAGES_DIR, env = "GRAYHARVEST_IMAGES_DIR")]
    /// Where downloaded images go, defaults to `images`.
    /// Env: GRAYHARVEST_IMAGES_DIR
    pub images_dir: PathBuf,

    #[clap(
        long,
        default_value = DEFAULT_GRAYSCALE_DIR,
        env = "GRAYHARVEST_GRAYSCALE_DIR"
    )]
    /// Where grayscale copies go, defaults to `gs-images`.
    /// Env: GRAYHARVEST_GRAYSCALE_DIR
    pub grayscale_dir: PathBuf,

    #[clap(long, default_value = DEFAULT_EXTENSION, env = "GRAYHARVEST_EXTENSION")]
    /// Extension for output files, also picks the grayscale encoder.
    /// Env: GRAYHARVEST_EXTENSION
    pub extension: String,

    #[clap(
        long,
        default_value_t = DEFAULT_PROBE_TIMEOUT_SECONDS,
        env = "GRAYHARVEST_PROBE_TIMEOUT"
    )]
    /// Seconds to wait on each liveness probe.
    /// Env: GRAYHARVEST_PROBE_TIMEOUT
    pub probe_timeout: u64,

    #[clap(long, default_value_t = default_max_cycles(), env = "GRAYHARVEST_MAX_CYCLES")]
    /// Give up after this many generate/extract cycles.
    /// Env: GRAYHARVEST_MAX_CYCLES
    pub max_cycles: NonZeroU32,

    #[clap(long, env = "GRAYHARVEST_STRICT_URLS")]
    /// Parse candidate URLs and require a .jpg/.jpeg/.png path instead of
    /// accepting any line that mentions "http".
    /// Env: GRAYHARVEST_STRICT_URLS
    pub strict_urls: bool,
}

fn default_max_cycles() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_MAX_CYCLES).unwrap_or(NonZeroU32::MIN)
}

/// Parses the image count like C's `atoi`: leading whitespace is skipped, an
/// optional sign and the leading digits are read, anything else is ignored.
/// Garbage and negative numbers both come out as zero.
pub fn parse_count(value: &str) -> Result<usize, String> {
    let value = value.trim_start();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let count = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0usize, |acc, digit| {
            acc.saturating_mul(10).saturating_add(digit as usize)
        });
    Ok(if negative { 0 } else { count })
}
