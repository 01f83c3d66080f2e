use std::future::Future;
use std::time::Duration;

use vigil_core::errors::CapabilityError;

/// Await `call`, failing with [`CapabilityError::Timeout`] once `limit` passes.
pub(crate) async fn within<T, F>(
    capability: &'static str,
    limit: Option<Duration>,
    call: F,
) -> Result<T, CapabilityError>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    match limit {
        Some(after) => tokio::time::timeout(after, call)
            .await
            .unwrap_or(Err(CapabilityError::Timeout { capability, after })),
        None => call.await,
    }
}
