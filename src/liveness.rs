//! Cheap reachability checks for candidate URLs.

use tracing::debug;

use crate::transport::Transport;

/// True only when a HEAD request gets through and the final status is exactly 200.
pub fn is_accessible(transport: &dyn Transport, url: &str) -> bool {
    match transport.head(url) {
        Ok(200) => true,
        Ok(status) => {
            debug!("Rejecting {url}: status {status}");
            false
        }
        Err(err) => {
            debug!("Rejecting {url}: {err}");
            false
        }
    }
}
