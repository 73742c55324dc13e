//! Web-app manifest module
//!
//! Renders the manifest the dashboard installs under as a PWA. The manifest
//! is generated from configuration rather than read from disk, so the served
//! JSON always matches the running config. It can also be written into the
//! build output for deployments that serve the bundle statically.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{IconConfig, ManifestConfig};
use crate::logger;

/// The manifest document, shaped for serialization
#[derive(Debug, Clone, Serialize)]
pub struct WebManifest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    pub start_url: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
}

/// One icon entry in the manifest
#[derive(Debug, Clone, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub icon_type: String,
}

impl From<&IconConfig> for ManifestIcon {
    fn from(icon: &IconConfig) -> Self {
        Self {
            src: icon.src.clone(),
            sizes: icon.sizes.clone(),
            icon_type: icon.icon_type.clone(),
        }
    }
}

impl WebManifest {
    pub fn from_config(cfg: &ManifestConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            short_name: cfg.short_name.clone(),
            description: cfg.description.clone(),
            theme_color: cfg.theme_color.clone(),
            start_url: cfg.start_url.clone(),
            scope: cfg.scope.clone(),
            icons: cfg.icons.iter().map(ManifestIcon::from).collect(),
        }
    }

    /// Render the manifest as pretty-printed JSON
    pub fn render(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(self).unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to render manifest: {e}"));
            b"{}".to_vec()
        })
    }

    /// Write the rendered manifest to `<output_dir>/<route>`, creating
    /// parent directories as needed.
    pub fn write_to(&self, output_dir: &Path, route: &str) -> io::Result<PathBuf> {
        let target = output_dir.join(route.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, self.render())?;
        Ok(target)
    }
}
