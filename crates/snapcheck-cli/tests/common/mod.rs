//! Shared fixtures for CLI integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use snapcheck_test_support::{write_constant_classifier, SyntheticImageBuilder};
use tempfile::TempDir;

/// Scores that leave an image unflagged by both models.
pub const PASSING_ROTATION: f32 = 0.9;
pub const PASSING_CROP: f32 = 0.999_999_9;

/// An isolated home with model artifacts and an image directory.
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    /// Creates a sandbox whose models produce the given scores.
    pub fn with_scores(rotation: f32, crop: f32) -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("models")).unwrap();
        std::fs::create_dir_all(root.path().join("images")).unwrap();
        std::fs::create_dir_all(root.path().join("config")).unwrap();
        std::fs::create_dir_all(root.path().join("data")).unwrap();
        let sandbox = Self { root };
        write_constant_classifier(&sandbox.rotation_model(), rotation).unwrap();
        write_constant_classifier(&sandbox.crop_model(), crop).unwrap();
        sandbox
    }

    /// Sandbox whose models pass every image.
    pub fn passing() -> Self {
        Self::with_scores(PASSING_ROTATION, PASSING_CROP)
    }

    pub fn rotation_model(&self) -> PathBuf {
        self.root.path().join("models/rotation.safetensors")
    }

    pub fn crop_model(&self) -> PathBuf {
        self.root.path().join("models/crop.safetensors")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.root.path().join("models")
    }

    pub fn images(&self) -> PathBuf {
        self.root.path().join("images")
    }

    /// Writes a sharp checkerboard PNG and returns its path.
    pub fn sharp_image(&self, name: &str) -> PathBuf {
        self.write_image(name, &SyntheticImageBuilder::sharp_image().bytes)
    }

    /// Writes a uniform gray PNG and returns its path.
    pub fn blurry_image(&self, name: &str) -> PathBuf {
        self.write_image(name, &SyntheticImageBuilder::blurry_image().bytes)
    }

    pub fn write_image(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.images().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// The binary with config and data directories pointed into the
    /// sandbox and the working directory set to its root.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("snapcheck").unwrap();
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("XDG_DATA_HOME", self.root.path().join("data"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// `command()` with both model flags set.
    pub fn check(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--rotation-model")
            .arg(self.rotation_model())
            .arg("--crop-model")
            .arg(self.crop_model())
            .arg("--quiet");
        cmd
    }

    pub fn write_project_config(&self, toml: &str) {
        std::fs::write(self.root.path().join(".snapcheck.toml"), toml).unwrap();
    }

    pub fn write_xdg_config(&self, toml: &str) {
        let dir = self.root.path().join("config/snapcheck");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), toml).unwrap();
    }
}

/// Parses JSON Lines output into values.
pub fn jsonl(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
