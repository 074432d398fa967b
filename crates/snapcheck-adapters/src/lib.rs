//! Snapcheck Adapters - External adapters for snapcheck.
//!
//! This crate provides adapters for:
//! - Filesystem image source
//! - Model artifact fetching, verification and caching

pub mod fs;
pub mod models;

pub use fs::FsImageSource;
pub use models::{
    fetch_to_cache, list_models, model_path, models_dir, resolve_sources, sha256_hex,
    ModelStatus, SourceFetcher,
};
