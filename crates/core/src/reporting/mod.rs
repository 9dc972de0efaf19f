pub mod emotion_reporter;
pub mod locale;
