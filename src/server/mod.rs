// Server module entry point
// Listener setup, accept loop, per-connection serving, shutdown watching

pub mod accept;
pub mod connection;
pub mod listener;
pub mod shutdown;

// Re-export commonly used entry points
pub use accept::serve;
pub use listener::bind_listener;
