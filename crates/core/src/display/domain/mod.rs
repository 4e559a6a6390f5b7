pub mod annotation;
pub mod frame_display;
