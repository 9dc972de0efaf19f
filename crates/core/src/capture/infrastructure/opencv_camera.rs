use std::path::Path;

use opencv::core::{self, Mat, Vector};
use opencv::prelude::*;
use opencv::{highgui, imgcodecs, videoio};

use crate::capture::domain::capture_device::CaptureDevice;
use crate::capture::domain::capture_error::CaptureError;
use crate::shared::constants::{KEY_POLL_MS, PREVIEW_WINDOW_TITLE};

/// Horizontal flip code for `core::flip`.
const MIRROR: i32 = 1;

/// Webcam plus preview window through OpenCV's `videoio` and `highgui`.
pub struct OpencvCamera {
    capture: videoio::VideoCapture,
    window: String,
    current: Mat,
    open: bool,
}

impl OpencvCamera {
    pub fn new(device_index: i32) -> Result<Self, CaptureError> {
        log::info!("Opening camera device {device_index}");
        let capture = videoio::VideoCapture::new(device_index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CaptureError::DeviceUnavailable(device_index));
        }
        highgui::named_window(PREVIEW_WINDOW_TITLE, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            capture,
            window: PREVIEW_WINDOW_TITLE.to_string(),
            current: Mat::default(),
            open: true,
        })
    }

    fn grab_frame(&mut self) -> Result<(), CaptureError> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.rows() == 0 || frame.cols() == 0 {
            return Err(CaptureError::FrameRead);
        }
        core::flip(&frame, &mut self.current, MIRROR)?;
        highgui::imshow(&self.window, &self.current)?;
        Ok(())
    }

    fn save_frame(&self, path: &Path) -> Result<(), CaptureError> {
        if self.current.rows() == 0 {
            return Err(CaptureError::NoFrame);
        }
        let target = path
            .to_str()
            .ok_or_else(|| CaptureError::Write(path.to_path_buf()))?;
        if !imgcodecs::imwrite(target, &self.current, &Vector::new())? {
            return Err(CaptureError::Write(path.to_path_buf()));
        }
        Ok(())
    }
}

impl CaptureDevice for OpencvCamera {
    fn grab(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.grab_frame()?)
    }

    fn poll_key(&mut self) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(KEY_POLL_MS)?;
        Ok((key >= 0).then_some(key & 0xff))
    }

    fn save_current(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.save_frame(path)?)
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {e}");
        }
        if let Err(e) = highgui::destroy_window(&self.window) {
            log::warn!("Failed to close preview window: {e}");
        }
    }
}

impl Drop for OpencvCamera {
    fn drop(&mut self) {
        self.close();
    }
}
