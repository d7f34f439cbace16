// Cooperative stop signal shared by the background tasks.

use tokio::sync::watch;

/// Resolves once `true` is published or the sender is gone.
///
/// Racing an in-flight fetch against this drops the fetch on shutdown.
pub async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
