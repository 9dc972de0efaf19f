use std::path::{Path, PathBuf};

use crate::capture::domain::capture_device::CaptureDevice;
use crate::capture::domain::capture_key::CaptureKey;

/// Live preview loop that stores one frame when the capture key is pressed.
pub struct CaptureImageUseCase {
    device: Box<dyn CaptureDevice>,
}

impl CaptureImageUseCase {
    pub fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self { device }
    }

    /// Runs the preview until the capture or escape key.
    ///
    /// Returns the written `capture{frame}.jpg` path inside `store_dir`, or
    /// `None` when the user aborted. The device is closed on every exit path.
    pub fn execute(
        &mut self,
        store_dir: &Path,
    ) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        log::info!("Video capture started: press P to take a picture, Esc to cancel");
        let result = self.run_loop(store_dir);
        self.device.close();
        match &result {
            Ok(Some(path)) => log::info!("Captured {}", path.display()),
            Ok(None) => log::info!("Video capture cancelled"),
            Err(e) => log::error!("Video capture failed: {e}"),
        }
        result
    }

    fn run_loop(
        &mut self,
        store_dir: &Path,
    ) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        let mut frame: usize = 0;
        loop {
            self.device.grab()?;
            let key = self.device.poll_key()?.and_then(CaptureKey::from_code);
            match key {
                Some(CaptureKey::Capture) => {
                    let path = capture_path(store_dir, frame);
                    self.device.save_current(&path)?;
                    return Ok(Some(path));
                }
                Some(CaptureKey::Abort) => return Ok(None),
                None => frame += 1,
            }
        }
    }
}

pub fn capture_path(store_dir: &Path, frame: usize) -> PathBuf {
    store_dir.join(format!("capture{frame}.jpg"))
}
