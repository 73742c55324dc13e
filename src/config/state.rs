// Application state module
// Immutable runtime state derived from configuration at startup

use hyper::body::Bytes;

use super::types::Config;
use super::MountConfig;
use crate::manifest::WebManifest;
use crate::resolver::{Mount, MountTable, StaticResolver};

/// Application state shared across request tasks
///
/// Built once at startup and never mutated afterwards, so handlers read it
/// without locks.
pub struct AppState {
    pub config: Config,
    pub resolver: StaticResolver,
    /// Rendered manifest and its serving route, when enabled
    pub manifest: Option<ManifestState>,
}

/// The generated manifest, rendered once at startup
pub struct ManifestState {
    /// Absolute URL path the manifest is served under
    pub route: String,
    /// Rendered JSON body
    pub body: Bytes,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let resolver = StaticResolver::new(mount_table(&config.mounts));

        let manifest = config.manifest.enabled.then(|| ManifestState {
            route: absolute_route(&config.manifest.route),
            body: Bytes::from(WebManifest::from_config(&config.manifest).render()),
        });

        Self {
            config: config.clone(),
            resolver,
            manifest,
        }
    }
}

/// Build the ordered mount table from the `[[mounts]]` entries
fn mount_table(mounts: &[MountConfig]) -> MountTable {
    MountTable::new(
        mounts
            .iter()
            .map(|m| Mount::new(&m.route, m.dir.as_str()))
            .collect(),
    )
}

/// Turn a configured route into an absolute URL path
fn absolute_route(route: &str) -> String {
    format!("/{}", route.trim_start_matches('/'))
}
