//! Getting image URLs out of a text model.
//!
//! Each cycle is two prompts. The first asks for image URLs and gets back
//! whatever prose the model feels like writing; the second feeds that prose
//! back and asks for nothing but URLs, one per line. Lines that look like
//! URLs are probed and the reachable ones are kept, in order, until enough
//! have been found or the cycle budget runs out.

use std::num::NonZeroU32;

use tracing::{debug, info, warn};
use url::Url;

use crate::constants::IMAGE_EXTENSIONS;
use crate::gemini::GeminiClient;
use crate::liveness::is_accessible;
use crate::transport::Transport;

/// How candidate URLs are picked out of the extraction reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UrlFilter {
    /// Any line containing `http` is a candidate, whole line included.
    #[default]
    Substring,
    /// An `http(s)://` token on the line must parse, have a host, and
    /// have a path ending in `.jpg`, `.jpeg` or `.png`.
    Strict,
}

impl UrlFilter {
    /// Returns the candidate URL carried by `line`, if any.
    pub fn candidate(self, line: &str) -> Option<String> {
        match self {
            Self::Substring => line.contains("http").then(|| line.to_string()),
            Self::Strict => line.split_whitespace().find_map(strict_candidate),
        }
    }
}

fn strict_candidate(token: &str) -> Option<String> {
    let start = token.find("http")?;
    let token = token
        .get(start..)?
        .trim_end_matches(['>', ')', ']', '}', '"', '\'', '.', ',', ';', ':', '!', '?']);
    let url = Url::parse(token).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    if url.host_str().is_none_or(str::is_empty) {
        return None;
    }
    let extension = url
        .path_segments()?
        .next_back()?
        .rsplit_once('.')?
        .1
        .to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then(|| url.to_string())
}

/// Splits `text` into lines and keeps the candidates, in order.
pub fn candidate_urls(text: &str, filter: UrlFilter) -> Vec<String> {
    text.lines().filter_map(|line| filter.candidate(line)).collect()
}

/// First prompt: ask for `count` image URLs.
pub fn generation_prompt(count: usize) -> String {
    format!(
        "Generate {count} public domain image URLs (either JPEG or PNG format) from trusted \
         public domain image repositories. Exclude Wikimedia Commons and related sites. \
         Each URL must point directly to a valid image file ending with .jpg or .png, and \
         the file size must be less than 200 KB. Provide the final image URLs in plain text."
    )
}

/// Second prompt: ask for only the URLs found in `generated`.
pub fn extraction_prompt(generated: &str) -> String {
    format!(
        "Extract all URLs from the following contents into a plain text list. \
         Each URL must be on a new line. These are the contents: {generated}"
    )
}

/// What a harvest produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// How many URLs were asked for
    pub requested: usize,
    /// Accepted URLs in discovery order, never more than `requested`
    pub urls: Vec<String>,
    /// Generate/extract cycles actually run
    pub cycles: u32,
}

impl HarvestReport {
    /// How many URLs are still missing.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.urls.len())
    }
}

/// Runs generate/extract/probe cycles against one Gemini client.
pub struct Harvester<'a> {
    gemini: &'a GeminiClient<'a>,
    transport: &'a dyn Transport,
    max_cycles: NonZeroU32,
    filter: UrlFilter,
}

impl<'a> Harvester<'a> {
    /// `transport` is used for the liveness probes.
    pub fn new(
        gemini: &'a GeminiClient<'a>,
        transport: &'a dyn Transport,
        max_cycles: NonZeroU32,
        filter: UrlFilter,
    ) -> Self {
        Self {
            gemini,
            transport,
            max_cycles,
            filter,
        }
    }

    /// Collects up to `count` reachable URLs.
    ///
    /// URLs accepted in earlier cycles are kept, and repeats are not
    /// filtered out. Stops early once `count` is reached.
    pub fn harvest(&self, count: usize) -> HarvestReport {
        let mut report = HarvestReport {
            requested: count,
            urls: Vec::with_capacity(count),
            cycles: 0,
        };

        while report.urls.len() < count && report.cycles < self.max_cycles.get() {
            report.cycles += 1;
            info!(
                "Harvest cycle {}/{}: {}/{} URLs so far",
                report.cycles,
                self.max_cycles,
                report.urls.len(),
                count
            );
            self.run_cycle(count, &mut report.urls);
        }

        if report.shortfall() > 0 {
            warn!(
                "Gave up after {} cycles with {}/{} URLs",
                report.cycles,
                report.urls.len(),
                count
            );
        }
        report
    }

    fn run_cycle(&self, count: usize, accepted: &mut Vec<String>) {
        let generated = self.gemini.generate_text(&generation_prompt(count));
        if generated.trim().is_empty() {
            warn!("Gemini generation returned empty text");
            return;
        }

        let extracted = self.gemini.generate_text(&extraction_prompt(&generated));
        let candidates = candidate_urls(&extracted, self.filter);
        debug!("{} candidate URLs from extraction", candidates.len());
        if candidates.is_empty() {
            warn!("Gemini extraction returned no candidate URLs");
            return;
        }

        for url in candidates {
            if accepted.len() >= count {
                break;
            }
            if is_accessible(self.transport, &url) {
                info!("Accepted {url}");
                accepted.push(url);
            }
        }
    }
}
