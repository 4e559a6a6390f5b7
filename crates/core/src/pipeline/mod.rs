pub mod detection_loop;
pub mod pipeline_logger;
