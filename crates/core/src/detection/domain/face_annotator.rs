use crate::shared::face::FaceRecord;

/// Domain interface for the remote face annotation service.
///
/// One call per image. Implementations own any client state, so callers
/// build them once and pass them in.
pub trait FaceAnnotator {
    /// Returns at most `max_results` faces found in the encoded image bytes.
    fn annotate(
        &self,
        image: &[u8],
        max_results: u32,
    ) -> Result<Vec<FaceRecord>, Box<dyn std::error::Error>>;
}
