//! Static path resolution module
//!
//! Maps raw request paths onto the mount table and loads the backing file
//! when one exists. Query strings never participate in resolution, lookups
//! stay confined to the mount's directory, and the extension decides both
//! the Content-Type and whether the file is read as text or raw bytes.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use super::mount::MountTable;
use crate::http::mime;
use crate::logger;

/// Body of a resolved asset, split by read mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBody {
    /// Decoded text (`.yml`, `.yaml`, `.css`, `.json`)
    Text(String),
    /// Raw bytes (everything else, images included)
    Binary(Vec<u8>),
}

impl AssetBody {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAsset {
    /// No mount matched, or no regular file backs the path; the caller
    /// falls through to the next handler.
    NotFound,
    /// A mounted file was read successfully.
    Found {
        body: AssetBody,
        content_type: &'static str,
    },
}

/// Failure while reading a file that already passed the existence check.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves request paths against an ordered mount table.
///
/// Immutable after construction, so it can be shared across request tasks
/// without locking.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    mounts: MountTable,
}

impl StaticResolver {
    pub const fn new(mounts: MountTable) -> Self {
        Self { mounts }
    }

    pub const fn mounts(&self) -> &MountTable {
        &self.mounts
    }

    /// Resolve a raw request path (query string allowed) to an asset.
    ///
    /// Paths outside every mount return `NotFound` without touching the
    /// filesystem. Directories and dangling paths also return `NotFound`,
    /// as do lookups that escape the mount root after canonicalization
    /// (symlinks included). A file vanishing between the existence check
    /// and the read degrades to `NotFound`; any other read failure is an
    /// error.
    pub async fn resolve(&self, raw_path: &str) -> Result<ResolvedAsset, ResolveError> {
        let path = strip_query(raw_path);

        let Some((mount, rest)) = self.mounts.match_path(path) else {
            return Ok(ResolvedAsset::NotFound);
        };

        let candidate = mount.root().join(rest);

        let Some(file_path) = confine_to_root(mount.root(), &candidate).await else {
            return Ok(ResolvedAsset::NotFound);
        };

        match fs::metadata(&file_path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Ok(ResolvedAsset::NotFound),
        }

        load_asset(&file_path).await
    }
}

/// Drop the query component: everything from the first `?` onward.
pub fn strip_query(raw_path: &str) -> &str {
    raw_path.split_once('?').map_or(raw_path, |(path, _)| path)
}

/// Canonicalize `candidate` and require it to stay inside `root`.
///
/// Returns `None` when either side cannot be canonicalized (missing file,
/// missing root) or when the candidate escapes the root.
async fn confine_to_root(root: &Path, candidate: &Path) -> Option<PathBuf> {
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Mount root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Canonicalize failure here is the ordinary 404 case, no log needed
    let candidate_canonical = fs::canonicalize(candidate).await.ok()?;

    if candidate_canonical.starts_with(&root_canonical) {
        Some(candidate_canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            candidate.display(),
            candidate_canonical.display()
        ));
        None
    }
}

/// Read the file in the mode its extension selects.
///
/// Text-mode reads decode lossily, matching how the dashboard pipeline
/// reads config and style files. A file that disappeared since the
/// existence check degrades to `NotFound`; other read faults propagate.
async fn load_asset(file_path: &Path) -> Result<ResolvedAsset, ResolveError> {
    let extension = file_path.extension().and_then(|e| e.to_str());
    let content_type = mime::get_content_type(extension);

    let bytes = match fs::read(file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(ResolvedAsset::NotFound);
        }
        Err(source) => {
            return Err(ResolveError::Io {
                path: file_path.to_path_buf(),
                source,
            });
        }
    };

    let body = if mime::is_text_extension(extension) {
        AssetBody::Text(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        AssetBody::Binary(bytes)
    };

    Ok(ResolvedAsset::Found { body, content_type })
}
