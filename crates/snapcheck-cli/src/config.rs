//! Configuration file support for snapcheck.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/snapcheck/config.toml` (lowest priority)
//! - Project-local: `.snapcheck.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Name of the project-local config file.
const PROJECT_CONFIG: &str = ".snapcheck.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Model sources and cache location.
    pub models: ModelsConfig,
    /// Verdict policy.
    pub policy: PolicyConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
    /// Rotation model location (URL or path).
    pub rotation: Option<String>,
    /// Crop model location (URL or path).
    pub crop: Option<String>,
    /// Expected SHA-256 of the rotation artifact.
    pub rotation_sha256: Option<String>,
    /// Expected SHA-256 of the crop artifact.
    pub crop_sha256: Option<String>,
}

/// Verdict policy configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Whether a blurred image is invalid.
    pub blur_affects_validity: Option<bool>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/snapcheck/config.toml`
    /// 2. Project-local: `.snapcheck.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as
    /// warnings and dropped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Drops invalid values and describes each one.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(f) = self.output.format.take() {
            if f == "json" || f == "jsonl" {
                self.output.format = Some(f);
            } else {
                problems.push(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        for (key, digest) in [
            ("models.rotation_sha256", &mut self.models.rotation_sha256),
            ("models.crop_sha256", &mut self.models.crop_sha256),
        ] {
            if let Some(d) = digest.take() {
                if is_sha256_hex(&d) {
                    *digest = Some(d);
                } else {
                    problems.push(format!("{key} must be 64 hex characters, got '{d}'"));
                }
            }
        }

        for (key, location) in [
            ("models.rotation", &mut self.models.rotation),
            ("models.crop", &mut self.models.crop),
        ] {
            if location.as_deref().is_some_and(|l| l.trim().is_empty()) {
                *location = None;
                problems.push(format!("{key} must not be empty"));
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
        self.models.rotation = other.models.rotation.or_else(|| self.models.rotation.take());
        self.models.crop = other.models.crop.or_else(|| self.models.crop.take());
        self.models.rotation_sha256 = other
            .models
            .rotation_sha256
            .or_else(|| self.models.rotation_sha256.take());
        self.models.crop_sha256 = other
            .models
            .crop_sha256
            .or_else(|| self.models.crop_sha256.take());

        self.policy.blur_affects_validity = other
            .policy
            .blur_affects_validity
            .or(self.policy.blur_affects_validity);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("snapcheck").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.snapcheck.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
