//! Saving remote images to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::error::GrayHarvestError;
use crate::transport::Transport;

/// Streams `url` into `path`, truncating whatever was there.
///
/// Succeeds whenever the transfer itself succeeds, even on a non-2xx status.
/// On failure the file is left as-is, possibly empty or partial.
pub fn download_image(
    transport: &dyn Transport,
    url: &str,
    path: &Path,
) -> Result<u64, GrayHarvestError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let (status, written) = transport.fetch_to(url, &mut writer)?;
    writer.flush()?;
    if !(200..300).contains(&status) {
        warn!("{url} answered {status}, saved the body to {} anyway", path.display());
    }
    Ok(written)
}
