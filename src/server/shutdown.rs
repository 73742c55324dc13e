// Shutdown signal module
// Watches Ctrl+C (and SIGTERM on Unix) and notifies the accept loop

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn the signal watcher and return the notifier the accept loop waits on.
///
/// `notify_one` stores a permit, so a signal arriving before the loop
/// reaches its first wait is not lost.
pub fn watch() -> Arc<Notify> {
    let notify = Arc::new(Notify::new());
    let signal = Arc::clone(&notify);

    tokio::spawn(async move {
        wait_for_signal().await;
        signal.notify_one();
    });

    notify
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
            // Ctrl+C still works without it
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
