//! Model identities and artifact locations.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The two scoring models the pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Detects rotated captures.
    Rotation,
    /// Detects badly cropped or framed captures.
    Crop,
}

impl ModelKind {
    /// Both models, in load order.
    pub const ALL: [Self; 2] = [Self::Rotation, Self::Crop];

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Crop => "crop",
        }
    }

    /// File name of the cached artifact.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Rotation => "rotation.safetensors",
            Self::Crop => "crop.safetensors",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a model artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLocation {
    /// Remote artifact fetched over HTTP(S).
    Url(String),
    /// Local file.
    Path(PathBuf),
}

impl FromStr for ModelLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for ModelLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A model artifact location with an optional expected digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    /// Artifact location.
    pub location: ModelLocation,
    /// Expected lowercase hex SHA-256 of the artifact, if known.
    pub sha256: Option<String>,
}

impl ModelSource {
    /// Creates a source without checksum verification.
    #[must_use]
    pub const fn new(location: ModelLocation) -> Self {
        Self {
            location,
            sha256: None,
        }
    }

    /// Sets the expected SHA-256 digest.
    #[must_use]
    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = Some(sha256.into().to_lowercase());
        self
    }
}

/// Sources for both models, resolved once before any assessment runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSources {
    /// Rotation model source.
    pub rotation: ModelSource,
    /// Crop model source.
    pub crop: ModelSource,
}

impl ModelSources {
    /// Returns the source for one model.
    #[must_use]
    pub const fn get(&self, kind: ModelKind) -> &ModelSource {
        match kind {
            ModelKind::Rotation => &self.rotation,
            ModelKind::Crop => &self.crop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parsing() {
        assert_eq!(
            "https://example.com/m.safetensors".parse::<ModelLocation>(),
            Ok(ModelLocation::Url("https://example.com/m.safetensors".into()))
        );
        assert_eq!(
            "models/rotation.safetensors".parse::<ModelLocation>(),
            Ok(ModelLocation::Path(PathBuf::from("models/rotation.safetensors")))
        );
    }

    #[test]
    fn test_sha256_is_normalized() {
        let source = ModelSource::new(ModelLocation::Path("x".into())).with_sha256("ABCDEF");
        assert_eq!(source.sha256.as_deref(), Some("abcdef"));
    }

    #[test]
    fn test_model_names() {
        assert_eq!(ModelKind::Rotation.to_string(), "rotation");
        assert_eq!(ModelKind::Crop.filename(), "crop.safetensors");
    }
}
