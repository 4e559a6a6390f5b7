pub mod class_names;
pub mod detection;
pub mod model_config;
pub mod object_detector;
