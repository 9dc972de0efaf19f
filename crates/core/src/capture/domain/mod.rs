pub mod capture_device;
pub mod capture_error;
pub mod capture_key;
