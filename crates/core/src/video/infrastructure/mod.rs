pub(crate) mod mat_conversion;
pub mod opencv_capture;
