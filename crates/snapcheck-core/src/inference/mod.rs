//! ML inference using Candle.
//!
//! Provides weight loading, device selection and the binary classifier
//! used for both rotation and crop scoring.

mod classifier;
mod device;
mod loader;

pub use classifier::BinaryClassifier;
pub use device::get_device;
pub use loader::varbuilder_from_bytes;
