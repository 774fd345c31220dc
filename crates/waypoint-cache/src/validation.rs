//! Response validation policy
//!
//! Classifies the raw outcome of a refresh attempt before the cache commits
//! to it. `Unusable` and `TransportFailure` degrade identically today (keep
//! the stored copy), but the two are kept apart in the verdict and in the
//! counters so the distinction stays observable.

use tracing::trace;

use waypoint_client::{Envelope, RawResponse};

/// Tri-state outcome of inspecting a refresh attempt
#[derive(Debug, Clone)]
pub enum ValidationVerdict {
    /// The remote answered with a success envelope; the body is servable
    Usable(String),
    /// The remote answered, but the response cannot be served
    Unusable,
    /// No response reached us at all
    TransportFailure,
}

impl ValidationVerdict {
    /// Whether the verdict carries a servable body
    pub fn is_usable(&self) -> bool {
        matches!(self, ValidationVerdict::Usable(_))
    }
}

/// Classify one fetch outcome
///
/// `Usable` requires an HTTP 200, a non-empty body, a parseable envelope,
/// and an envelope status in the success allow-list. Everything the remote
/// answered that misses one of those is `Unusable`; a fetch that never
/// produced a response is `TransportFailure`. This function never fails:
/// malformed input is a verdict, not an error.
pub fn validate(outcome: Result<RawResponse, waypoint_client::Error>) -> ValidationVerdict {
    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            trace!("Transport failure: {}", error);
            return ValidationVerdict::TransportFailure;
        }
    };

    if !response.is_http_ok() || response.body.is_empty() {
        trace!("Rejected response with HTTP status {}", response.status);
        return ValidationVerdict::Unusable;
    }

    match Envelope::from_json(&response.body) {
        Ok(envelope) if envelope.is_success() => ValidationVerdict::Usable(response.body),
        Ok(envelope) => {
            trace!("Rejected envelope status {}", envelope.status);
            ValidationVerdict::Unusable
        }
        Err(error) => {
            trace!("Envelope did not parse: {}", error);
            ValidationVerdict::Unusable
        }
    }
}
