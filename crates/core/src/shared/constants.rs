pub const VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

pub const DEFAULT_MAX_RESULTS: u32 = 12;
pub const DEFAULT_OUTPUT_FILENAME: &str = "found-faces.jpg";
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const FONT_ENV: &str = "FACEMOOD_FONT";

/// Key poll timeout between preview frames.
pub const KEY_POLL_MS: i32 = 1;
pub const PREVIEW_WINDOW_TITLE: &str = "facemood";

pub const OUTLINE_COLOR: [u8; 3] = [0x00, 0xff, 0x00];
pub const LABEL_COLOR: [u8; 3] = [0xff, 0x00, 0x00];
pub const OUTLINE_WIDTH: u32 = 5;
/// Labels sit this many pixels above the first polygon vertex.
pub const LABEL_OFFSET_Y: i32 = 30;
pub const LABEL_SCALE: f32 = 20.0;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp"];
