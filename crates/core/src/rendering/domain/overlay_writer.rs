use std::path::Path;

use crate::shared::face::FaceRecord;

/// Writes an annotated copy of an encoded image.
pub trait OverlayWriter {
    /// Decodes `image`, draws every face onto it and writes the result to
    /// `output`. The format follows the output extension.
    fn write(
        &self,
        image: &[u8],
        faces: &[FaceRecord],
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
