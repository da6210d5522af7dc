//! Shared defaults for things
//!

use std::time::Duration;

/// Base URL of the Gemini model collection, `<model>:generateContent` is appended.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Text model used for both the generation and the extraction prompt.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// File holding the API key on its first line.
pub const DEFAULT_KEY_FILE: &str = "googleai.key";

/// The default place we put downloaded images
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// The default place we put grayscale copies
pub const DEFAULT_GRAYSCALE_DIR: &str = "gs-images";

/// Extension given to every output file.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Timeout (in seconds) for the HEAD liveness probe.
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: u64 = 5;

/// Timeout for the HEAD liveness probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECONDS);

/// How many generate/extract cycles the harvester runs before giving up.
pub const DEFAULT_MAX_CYCLES: u32 = 10;

/// Extensions accepted by the strict URL filter.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
