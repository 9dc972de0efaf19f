/// Key codes that end the capture loop.
pub const CAPTURE_KEYS: [i32; 2] = ['p' as i32, 'P' as i32];
pub const ESCAPE_KEY: i32 = 27;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureKey {
    /// Save the current frame and stop.
    Capture,
    /// Stop without saving.
    Abort,
}

impl CaptureKey {
    /// Maps a raw key code; every other key keeps the preview running.
    pub fn from_code(code: i32) -> Option<Self> {
        if CAPTURE_KEYS.contains(&code) {
            Some(CaptureKey::Capture)
        } else if code == ESCAPE_KEY {
            Some(CaptureKey::Abort)
        } else {
            None
        }
    }
}
