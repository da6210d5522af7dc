//! Harvests public domain image URLs from Gemini, downloads them and saves grayscale copies.

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cli;
pub mod config;
pub mod constants;
pub mod credential;
pub mod download;
pub mod error;
pub mod gemini;
pub mod grayscale;
pub mod harvest;
pub mod liveness;
pub mod pipeline;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
