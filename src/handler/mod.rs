//! Request handler module
//!
//! Responsible for request routing dispatch: mounted static assets first,
//! then the generated manifest route, then the 404 fallback.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
