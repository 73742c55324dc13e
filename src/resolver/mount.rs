//! Mount table module
//!
//! An ordered list of URL-prefix-to-directory rules. Rules are tried in
//! declaration order and the first matching prefix wins, which makes
//! overlapping prefixes behave predictably.

use std::path::{Path, PathBuf};

/// A single URL prefix mounted onto a filesystem directory.
#[derive(Debug, Clone)]
pub struct Mount {
    prefix: String,
    root: PathBuf,
}

impl Mount {
    /// Create a mount, normalizing the prefix to `/segment/.../` form
    /// (leading slash enforced, trailing slash appended).
    pub fn new(prefix: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            root: root.into(),
        }
    }

    /// The normalized URL prefix, always starting and ending with `/`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The directory this prefix maps onto
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The part of `path` after this mount's prefix, if the prefix matches
    fn strip<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.strip_prefix(self.prefix.as_str())
    }
}

/// Ordered mount rules; earlier entries shadow later ones.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    pub const fn new(mounts: Vec<Mount>) -> Self {
        Self { mounts }
    }

    pub fn rules(&self) -> &[Mount] {
        &self.mounts
    }

    /// Find the first mount whose prefix matches `path`, together with the
    /// post-prefix remainder.
    ///
    /// Matching is literal: `/assets` does not match the mount `/assets/`.
    pub fn match_path<'t, 'p>(&'t self, path: &'p str) -> Option<(&'t Mount, &'p str)> {
        self.mounts
            .iter()
            .find_map(|mount| mount.strip(path).map(|rest| (mount, rest)))
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = if prefix.starts_with('/') {
        prefix.to_string()
    } else {
        format!("/{prefix}")
    };
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
