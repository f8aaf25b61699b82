//! HTTP status classification for the tracker client.

use reqwest::StatusCode;

use crate::domain::ports::TrackerError;

/// Map a non-success tracker response to the port error type.
pub fn classify_status(status: StatusCode, body: String) -> TrackerError {
    match status {
        StatusCode::UNAUTHORIZED => TrackerError::Unauthorized,
        // The tracker answers 203 with an HTML sign-in page for bad PATs;
        // reqwest treats it as success, so callers check it explicitly.
        StatusCode::NON_AUTHORITATIVE_INFORMATION => TrackerError::Unauthorized,
        StatusCode::NOT_FOUND => TrackerError::NotFound(body),
        _ => TrackerError::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}

/// Map a transport-level failure to the port error type.
pub fn transport(err: reqwest::Error) -> TrackerError {
    TrackerError::Transport(err.to_string())
}
