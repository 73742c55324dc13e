// Accept loop module
// Runs the listener until a shutdown signal arrives

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::shutdown;
use crate::config::AppState;
use crate::logger;

/// Accept connections until shutdown is requested.
///
/// Accept errors are logged and the loop keeps running; only the shutdown
/// signal ends it.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let shutdown_signal = shutdown::watch();
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown_signal.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}
