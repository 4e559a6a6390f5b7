//! Real-time object detection: pull frames from a camera, run a YOLOv5
//! ONNX model on each one, and display the annotated stream.
//!
//! Each bounded context splits a `domain` layer (types and collaborator
//! traits) from an `infrastructure` layer (ONNX Runtime, OpenCV). The
//! OpenCV adapters sit behind the `opencv` feature.

pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod video;
