//! Shared utilities for use cases.
//!
//! Cancellation helpers used by the round and refinement use cases.

use crate::use_cases::error::CouncilError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(CouncilError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), CouncilError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(CouncilError::Cancelled);
    }
    Ok(())
}

/// Resolves when the token is cancelled; never resolves without a token.
pub(crate) async fn cancelled(token: &Option<CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Run `fut` unless cancellation wins the race.
pub(crate) async fn cancellable<F, T>(
    token: &Option<CancellationToken>,
    fut: F,
) -> Result<T, CouncilError>
where
    F: std::future::Future<Output = Result<T, CouncilError>>,
{
    check_cancelled(token)?;
    tokio::select! {
        biased;
        _ = cancelled(token) => Err(CouncilError::Cancelled),
        result = fut => result,
    }
}
