/// YOLOv5 object detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference, YOLOv5 output decoding
/// (objectness × class score) and per-class NMS.
use std::path::Path;

use crate::detection::domain::detection::Detection;
use crate::detection::domain::model_config::ModelConfig;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

use super::execution_provider::preferred_execution_providers;

/// Fallback model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Letterbox pad value (YOLO convention).
const PAD_VALUE: f32 = 114.0 / 255.0;

/// Row layout: `[cx, cy, w, h, objectness, class scores...]`.
const BOX_VALUES: usize = 5;

/// YOLOv5 detector backed by an ONNX Runtime session.
pub struct OnnxYoloDetector {
    session: ort::session::Session,
    confidence: f64,
    iou_threshold: f64,
    max_detections: usize,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLOv5 ONNX export and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, config: &ModelConfig) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Model file not found: {}", model_path.display()).into());
        }

        let intra_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_intra_threads(intra_threads)?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_file(model_path)?;

        // NCHW: [1, 3, H, W]
        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        log::info!(
            "Loaded model {} (input {input_size}x{input_size})",
            model_path.display()
        );

        Ok(Self {
            session,
            confidence: config.confidence(),
            iou_threshold: config.iou_threshold(),
            max_detections: config.max_detections(),
            input_size,
        })
    }
}

impl ObjectDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        // 1. Preprocess: letterbox + normalize → NCHW float32
        let (input_tensor, geometry) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        // 3. Decode, 4. NMS, 5. map back to frame pixels
        let mut raw = decode_predictions(data, &shape, self.confidence)?;
        let mut kept = nms(&mut raw, self.iou_threshold);
        kept.truncate(self.max_detections);

        Ok(kept
            .iter()
            .map(|d| d.to_detection(&geometry, frame.width(), frame.height()))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Placement of the frame inside the square model input.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LetterboxGeometry {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl LetterboxGeometry {
    fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Letterbox-resize a frame to `target_size` × `target_size`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, LetterboxGeometry) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let mut tensor = ndarray::Array4::<f32>::from_elem(
        (1, 3, target_size as usize, target_size as usize),
        PAD_VALUE,
    );

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize + copy into padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        LetterboxGeometry {
            scale,
            pad_x,
            pad_y,
        },
    )
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A candidate box in letterbox coordinates.
#[derive(Clone, Debug)]
struct RawDetection {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    class_id: usize,
    confidence: f64,
}

impl RawDetection {
    fn corners(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    fn to_detection(&self, geometry: &LetterboxGeometry, width: u32, height: u32) -> Detection {
        let (x1, y1) = geometry.to_frame(self.x1, self.y1);
        let (x2, y2) = geometry.to_frame(self.x2, self.y2);
        let bbox = BoundingBox::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32).clamp_to(width, height);
        Detection::new(bbox, self.class_id, self.confidence)
    }
}

/// Parse YOLOv5 output rows, keeping those scoring at least `confidence`.
///
/// Accepts `[1, N, 5 + C]` and the transposed `[1, 5 + C, N]`.
fn decode_predictions(
    data: &[f32],
    shape: &[usize],
    confidence: f64,
) -> Result<Vec<RawDetection>, Box<dyn std::error::Error>> {
    if shape.len() != 3 {
        return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
    }
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats <= BOX_VALUES {
        return Err(format!("YOLO output has no class scores: {shape:?}").into());
    }
    if data.len() < num_dets * num_feats {
        return Err(format!(
            "YOLO output holds {} values, shape {shape:?} needs {}",
            data.len(),
            num_dets * num_feats
        )
        .into());
    }

    let value = |det: usize, feat: usize| -> f32 {
        if transposed {
            data[feat * num_dets + det]
        } else {
            data[det * num_feats + feat]
        }
    };

    let mut dets = Vec::new();
    for i in 0..num_dets {
        // Class scores are ≤ 1, so low objectness can never pass.
        let objectness = value(i, 4) as f64;
        if objectness < confidence {
            continue;
        }

        let mut class_id = 0;
        let mut class_score = f32::MIN;
        for c in 0..(num_feats - BOX_VALUES) {
            let s = value(i, BOX_VALUES + c);
            if s > class_score {
                class_id = c;
                class_score = s;
            }
        }

        let score = objectness * class_score as f64;
        if score < confidence {
            continue;
        }

        let cx = value(i, 0) as f64;
        let cy = value(i, 1) as f64;
        let w = value(i, 2) as f64;
        let h = value(i, 3) as f64;
        dets.push(RawDetection {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
            class_id,
            confidence: score,
        });
    }
    Ok(dets)
}

// ---------------------------------------------------------------------------
// NMS
// ---------------------------------------------------------------------------

/// Greedy per-class NMS: sort by confidence descending, suppress
/// same-class boxes overlapping a kept box by more than `iou_thresh`.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(dets[i].clone());
        for j in (i + 1)..dets.len() {
            if suppressed[j] || dets[j].class_id != dets[i].class_id {
                continue;
            }
            if bbox_iou(&dets[i].corners(), &dets[j].corners()) > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
