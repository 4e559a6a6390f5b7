/// Every frame is resampled to this size before inference.
pub const INFERENCE_WIDTH: u32 = 640;
pub const INFERENCE_HEIGHT: u32 = 480;

/// Confidence threshold the demo ships with.
///
/// The original tuning note calls this "25%", which does not match the
/// value; 0.08 is what actually runs.
pub const DEFAULT_CONFIDENCE: f64 = 0.08;

/// NMS IoU threshold (YOLOv5 default).
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.45;

/// Upper bound on detections kept per frame (YOLOv5 default).
pub const DEFAULT_MAX_DETECTIONS: usize = 1000;

pub const DEFAULT_CAMERA_INDEX: i32 = 0;

pub const WINDOW_TITLE: &str = "YOLOv5 Real-Time";

/// Key code that ends the loop (ESC).
pub const EXIT_KEY: i32 = 27;

pub const KEY_POLL_TIMEOUT_MS: i32 = 1;

/// Labels are drawn this many pixels above the box's top edge.
pub const LABEL_OFFSET_Y: i32 = 10;

/// Overlay color as RGB.
pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];
pub const BOX_THICKNESS: i32 = 2;
pub const LABEL_FONT_SCALE: f64 = 0.8;
pub const LABEL_THICKNESS: i32 = 2;
