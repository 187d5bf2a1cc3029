//! Deadline helpers.
//!
//! The core imposes no per-turn timeout; a caller bounding total run time
//! layers a deadline that simply sets the cancellation token.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::TillerError;

/// Wrap a future with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, TillerError>>,
) -> Result<T, TillerError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(TillerError::Timeout(duration.as_millis() as u64)),
    }
}

/// Cancel the token after the given duration, from a background task.
///
/// Dropping the returned handle does not disarm the deadline; abort it to
/// do that.
pub fn cancel_after(token: &CancellationToken, duration: Duration) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        token.cancel();
    })
}
