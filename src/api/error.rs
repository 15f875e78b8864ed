//! API error taxonomy
//!
//! Transport failures (including the request timeout), backend rejections,
//! and undecodable responses are distinct so the caller can phrase them
//! differently. All of them are recoverable: state is preserved and the
//! request can be retried.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("failed to build the HTTP client")]
    #[diagnostic(code(bmv::api::build))]
    Build(#[source] reqwest::Error),

    #[error("could not reach the backend at {url}")]
    #[diagnostic(
        code(bmv::api::transport),
        help("check that the backend is running and BMV_API_URL points at it")
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend rejected the request ({status}): {message}")]
    #[diagnostic(code(bmv::api::status))]
    Status { status: u16, message: String },

    #[error("unexpected response from {url}: {message}")]
    #[diagnostic(code(bmv::api::decode))]
    Decode { url: String, message: String },
}
