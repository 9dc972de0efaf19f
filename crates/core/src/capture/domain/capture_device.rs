use std::path::Path;

/// A live camera with a preview window.
///
/// Frames are mirrored before display so the preview behaves like a mirror.
pub trait CaptureDevice {
    /// Reads the next frame and shows it in the preview window.
    fn grab(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits briefly for a key press and returns its raw key code.
    fn poll_key(&mut self) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    /// Writes the most recently grabbed frame as a JPEG file.
    fn save_current(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>>;

    /// Releases the camera and closes the preview window. Idempotent.
    fn close(&mut self);
}
