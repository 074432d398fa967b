//! Test support utilities for snapcheck.
//!
//! Provides mocks, synthetic image builders, and fixture model artifacts
//! for testing the validity pipeline.
//!
//! # Example
//!
//! ```
//! use snapcheck_test_support::{FixedScorer, MockImageSource, SyntheticImageBuilder};
//! use snapcheck_core::{ModelRegistry, ValidityPipeline};
//!
//! let registry = ModelRegistry::new(FixedScorer::new(0.9), FixedScorer::new(0.9999999));
//! let sharp = SyntheticImageBuilder::checkerboard(224, 224);
//! let report = ValidityPipeline::new(&registry).assess(&sharp.bytes).unwrap();
//! assert!(report.valid);
//!
//! let source = MockImageSource::new(vec![sharp]);
//! ```

mod builders;
mod fixtures;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use fixtures::{constant_classifier_artifact, logit, write_constant_classifier};
pub use mocks::{
    FailingScorer, FixedScorer, MockFetcher, MockImageSource, MockProgressSink, MockResultOutput,
};
