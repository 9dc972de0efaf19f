#[cfg(feature = "camera")]
pub mod opencv_camera;
