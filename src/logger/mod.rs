//! Logger module
//!
//! Provides logging utilities for the dev server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::AppState;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &crate::config::Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Info and access lines; stdout until the writer is installed
fn write_out(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

/// Error and warning lines; stderr until the writer is installed
fn write_err(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    write_out("======================================");
    write_out("Dashboard dev server started");
    write_out(&format!("Listening on: http://{addr}"));
    let rules = state.resolver.mounts().rules();
    write_out(&format!("Mounts ({}):", rules.len()));
    for mount in rules {
        write_out(&format!("  {} -> {}", mount.prefix(), mount.root().display()));
    }
    match &state.manifest {
        Some(manifest) => write_out(&format!("Manifest route: {}", manifest.route)),
        None => write_out("Manifest: disabled"),
    }
    if let Some(workers) = state.config.server.workers {
        write_out(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = state.config.logging.access_log_file {
        write_out(&format!("Access log: {path}"));
    }
    if let Some(ref path) = state.config.logging.error_log_file {
        write_out(&format!("Error log: {path}"));
    }
    write_out("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_out(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_err(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_err(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_err(&format!("[WARN] {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_out(&format!("[Headers] Count: {count}"));
    }
}

/// Write one formatted access log line
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_out(&entry.format(format));
}

pub fn log_version_stamped(path: &Path, version: &str) {
    write_out(&format!("[Build] Version {version} written to {}", path.display()));
}

pub fn log_manifest_emitted(path: &Path) {
    write_out(&format!("[Build] Manifest written to {}", path.display()));
}

pub fn log_shutdown() {
    write_out("\n[Shutdown] Signal received, stopping server");
}
