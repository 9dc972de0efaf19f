use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera support is not compiled in; rebuild with `--features camera` or pass --path")]
    Unsupported,
    #[error("camera device {0} could not be opened")]
    DeviceUnavailable(i32),
    #[error("camera returned no frame")]
    FrameRead,
    #[error("no frame has been grabbed yet")]
    NoFrame,
    #[error("failed to write capture to {0}")]
    Write(PathBuf),
    #[cfg(feature = "camera")]
    #[error(transparent)]
    Backend(#[from] opencv::Error),
}
