//! Static path resolution
//!
//! The core of the dev server: an ordered table of URL-prefix mounts and
//! the resolver that turns request paths into file contents. Everything
//! here is immutable after startup and safe to share across tasks.

mod mount;
mod resolve;

pub use mount::{Mount, MountTable};
pub use resolve::{strip_query, ResolvedAsset, StaticResolver};
