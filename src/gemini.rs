//! Gemini `generateContent` client.
//!
//! Failures never escape this module as errors: a request that can't be sent
//! or a reply that can't be read both come back as empty text, after being
//! logged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::credential::Credential;
use crate::error::GrayHarvestError;
use crate::transport::{Transport, redact_query};

// -----------------------------
// Request
// -----------------------------

/// Request body for POST `<model>:generateContent`
#[derive(Serialize, Debug)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

// -----------------------------
// Response
// -----------------------------

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Builds `<api_base>/<model>:generateContent?key=<key>`.
pub fn endpoint_url(
    api_base: &str,
    model: &str,
    credential: &Credential,
) -> Result<Url, GrayHarvestError> {
    let base = format!("{}/{}:generateContent", api_base.trim_end_matches('/'), model);
    Ok(Url::parse_with_params(&base, &[("key", credential.expose())])?)
}

/// A single user-role content block holding `prompt`.
pub fn request_body(prompt: &str) -> Result<String, GrayHarvestError> {
    let request = GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_text(body: &str) -> Result<String, GrayHarvestError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    if let Some(err) = parsed.error {
        return Err(GrayHarvestError::MissingText(format!("API returned error: {err}")));
    }
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GrayHarvestError::MissingText("no candidates".to_string()))?;
    candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| GrayHarvestError::MissingText("first candidate has no text part".to_string()))
}

/// Sends prompts to one model with one key.
pub struct GeminiClient<'a> {
    transport: &'a dyn Transport,
    endpoint: Url,
}

impl<'a> GeminiClient<'a> {
    /// Fails only if `api_base` and `model` don't make a valid URL.
    pub fn new(
        transport: &'a dyn Transport,
        api_base: &str,
        model: &str,
        credential: &Credential,
    ) -> Result<Self, GrayHarvestError> {
        Ok(Self {
            transport,
            endpoint: endpoint_url(api_base, model, credential)?,
        })
    }

    /// Sends `prompt` and returns the raw response body, or `None` if the
    /// request never got a response.
    pub fn post_prompt(&self, prompt: &str) -> Option<String> {
        let body = match request_body(prompt) {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to build request: {}", err);
                return None;
            }
        };
        match self.transport.post_json(self.endpoint.as_str(), &body) {
            Ok(response) => Some(response),
            Err(err) => {
                error!("Error in request to {}: {}", redact_query(self.endpoint.as_str()), err);
                None
            }
        }
    }

    /// Sends `prompt` and returns the first candidate's text, or an empty
    /// string if anything went wrong along the way.
    pub fn generate_text(&self, prompt: &str) -> String {
        let Some(response) = self.post_prompt(prompt) else {
            return String::new();
        };
        match extract_text(&response) {
            Ok(text) => {
                debug!("Gemini returned {} bytes of text", text.len());
                text
            }
            Err(err) => {
                error!("Error when parsing response from Gemini: {}", err);
                String::new()
            }
        }
    }
}
