pub mod analyze_image_use_case;
pub mod capture_image_use_case;
pub mod pipeline_logger;
