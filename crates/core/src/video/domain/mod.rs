pub mod capture_source;
pub mod frame_source;
