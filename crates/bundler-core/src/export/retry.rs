//! Retry classification and backoff for create-view calls.

use crate::error::ExportError;
use std::time::Duration;

/// Determine whether a failed call is worth repeating.
///
/// Retryable: timeouts, transport failures, rate limits (429), server errors
/// (5xx). Anything else (auth, validation, a 200 instead of 201) is final.
pub fn is_retryable(error: &ExportError) -> bool {
    match error {
        ExportError::Timeout { .. } | ExportError::Transport(_) => true,
        ExportError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
    }
}

/// Exponential backoff: `base_delay * 2^attempt`, capped at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}
