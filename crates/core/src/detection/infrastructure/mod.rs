pub mod adc_file;
pub mod credentials;
pub mod vision_api_annotator;
pub(crate) mod vision_wire;
