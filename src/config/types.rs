// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// Mount rules, applied in declaration order
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// A URL prefix served from a directory
///
/// Declared as `[[mounts]]` entries; requests try them in declaration
/// order and the first matching prefix wins.
#[derive(Debug, Deserialize, Clone)]
pub struct MountConfig {
    /// URL prefix, e.g. "/assets/"
    pub route: String,
    /// Directory backing the prefix
    pub dir: String,
}

/// Generated web-app manifest configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ManifestConfig {
    /// Serve a generated manifest (default: on)
    #[serde(default = "default_manifest_enabled")]
    pub enabled: bool,
    /// Route the manifest is served under, relative to the server root
    #[serde(default = "default_manifest_route")]
    pub route: String,
    #[serde(default = "default_manifest_name")]
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    /// Start URL, relative to the manifest location
    #[serde(default = "default_manifest_start_url")]
    pub start_url: String,
    #[serde(default = "default_manifest_scope")]
    pub scope: String,
    #[serde(default)]
    pub icons: Vec<IconConfig>,
}

/// A manifest icon entry
#[derive(Debug, Deserialize, Clone)]
pub struct IconConfig {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub icon_type: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_route() -> String {
    "assets/manifest.json".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_name() -> String {
    "Dashboard".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_start_url() -> String {
    "../".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_manifest_scope() -> String {
    "../".to_string()
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: default_manifest_enabled(),
            route: default_manifest_route(),
            name: default_manifest_name(),
            short_name: None,
            description: None,
            theme_color: None,
            start_url: default_manifest_start_url(),
            scope: default_manifest_scope(),
            icons: Vec::new(),
        }
    }
}

/// Build output integration (version stamp and manifest emission)
#[derive(Debug, Deserialize, Clone)]
pub struct BuildConfig {
    /// Directory holding the built dashboard bundle
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Write `<output_dir>/VERSION` at startup
    #[serde(default)]
    pub stamp_version: bool,
    /// Write the rendered manifest into the output directory at startup
    #[serde(default)]
    pub emit_manifest: bool,
    /// Overrides the version discovered from package.json
    #[serde(default)]
    pub app_version: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_output_dir() -> String {
    "dist".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            stamp_version: false,
            emit_manifest: false,
            app_version: None,
        }
    }
}
