//! Loading the Gemini API key

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::GrayHarvestError;

/// The API key. Only the first line of the key file is kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a key that came from somewhere other than a file.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, as sent in the `key` query parameter.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Reads the first line of `path`.
///
/// Only the line terminator (`\n` or `\r\n`) is removed; any other trailing
/// whitespace is part of the key.
pub fn load_credential(path: &Path) -> Result<Credential, GrayHarvestError> {
    let file =
        File::open(path).map_err(|err| GrayHarvestError::MissingCredential(path.to_path_buf(), err))?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;

    let key = line
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line.as_str());
    if key.is_empty() {
        warn!("API key file {} is empty", path.display());
    }
    debug!("Loaded API key from {}", path.display());
    Ok(Credential::new(key))
}
