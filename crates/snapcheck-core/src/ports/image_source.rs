//! Image source port for reading submitted images.

use crate::domain::{RawImage, ReadError};

/// Port for reading images from a source.
///
/// Sources only read bytes; decoding belongs to the pipeline so that
/// undecodable input surfaces as a decode error on that image.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items are errors if an image cannot be read; the
    /// iteration continues past them.
    fn images(&self) -> Box<dyn Iterator<Item = Result<RawImage, ReadError>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
