use std::path::PathBuf;
use std::process;

use clap::Parser;

use yolo_live_core::detection::domain::class_names::ClassNames;
use yolo_live_core::detection::domain::model_config::ModelConfig;
use yolo_live_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use yolo_live_core::display::infrastructure::highgui_display::HighGuiDisplay;
use yolo_live_core::pipeline::detection_loop::DetectionLoop;
use yolo_live_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use yolo_live_core::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_DETECTIONS, WINDOW_TITLE,
};
use yolo_live_core::video::domain::capture_source::CaptureSource;
use yolo_live_core::video::infrastructure::opencv_capture::OpenCvCapture;

/// Real-time YOLOv5 object detection on a webcam feed. Press ESC to quit.
#[derive(Parser, Debug)]
#[command(name = "yolo-live")]
struct Cli {
    /// YOLOv5 model exported to ONNX.
    model: PathBuf,

    /// Camera index, /dev/videoN, video file or stream URL.
    #[arg(long, default_value = "0")]
    source: String,

    /// Minimum detection confidence (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// NMS IoU threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_IOU_THRESHOLD)]
    iou: f64,

    /// Maximum detections kept per frame.
    #[arg(long, default_value_t = DEFAULT_MAX_DETECTIONS)]
    max_detections: usize,

    /// Class names file, one per line (defaults to the 80 COCO classes).
    #[arg(long)]
    names: Option<PathBuf>,

    /// Title of the display window.
    #[arg(long, default_value = WINDOW_TITLE)]
    window_title: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    log::info!(
        "Confidence threshold {}, {} classes",
        config.confidence(),
        config.class_names().len()
    );

    let detector = OnnxYoloDetector::new(&cli.model, &config)?;
    let source = OpenCvCapture::open(&CaptureSource::parse(&cli.source))?;
    let display = HighGuiDisplay::new(&cli.window_title)?;

    let mut detection_loop = DetectionLoop::new(
        Box::new(source),
        Box::new(detector),
        Box::new(display),
        config,
        Box::new(StdoutPipelineLogger::default()),
    );
    let summary = detection_loop.run()?;
    log::info!(
        "Processed {} frames, {} detections ({})",
        summary.frames,
        summary.detections,
        summary.stop_reason
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ModelConfig, Box<dyn std::error::Error>> {
    let class_names = match &cli.names {
        Some(path) => ClassNames::from_file(path)?,
        None => ClassNames::coco(),
    };
    Ok(ModelConfig::new(
        cli.confidence,
        cli.iou,
        cli.max_detections,
        class_names,
    )?)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.model.exists() {
        return Err(format!("Model file not found: {}", cli.model.display()).into());
    }
    if let Some(names) = &cli.names {
        if !names.exists() {
            return Err(format!("Class names file not found: {}", names.display()).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;
    use yolo_live_core::detection::domain::model_config::ModelConfigError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("yolo-live").chain(args.iter().copied())).unwrap()
    }

    fn model_file(dir: &TempDir) -> String {
        let path = dir.path().join("yolov5s.onnx");
        fs::write(&path, b"fake model").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults_reproduce_demo() {
        let cli = parse(&["model.onnx"]);
        assert_eq!(cli.source, "0");
        assert_eq!(cli.confidence, 0.08);
        assert_eq!(cli.iou, 0.45);
        assert_eq!(cli.max_detections, 1000);
        assert_eq!(cli.window_title, "YOLOv5 Real-Time");
        assert!(cli.names.is_none());
    }

    #[test]
    fn test_model_is_required() {
        assert!(Cli::try_parse_from(["yolo-live"]).is_err());
    }

    #[test]
    fn test_validate_accepts_existing_model() {
        let dir = TempDir::new().unwrap();
        let model = model_file(&dir);
        let cli = parse(&[model.as_str()]);
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_model() {
        let cli = parse(&["/nonexistent/yolov5s.onnx"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Model file not found"));
    }

    #[test]
    fn test_validate_rejects_missing_names() {
        let dir = TempDir::new().unwrap();
        let model = model_file(&dir);
        let cli = parse(&[model.as_str(), "--names", "/nonexistent/names.txt"]);
        assert!(validate(&cli).is_err());
    }

    #[rstest]
    #[case::confidence(&["--confidence", "1.5"], ModelConfigError::Confidence(1.5))]
    #[case::iou(&["--iou=-0.1"], ModelConfigError::Iou(-0.1))]
    #[case::max_detections(&["--max-detections", "0"], ModelConfigError::MaxDetections)]
    fn test_build_config_rejects_out_of_range_values(
        #[case] flags: &[&str],
        #[case] expected: ModelConfigError,
    ) {
        let dir = TempDir::new().unwrap();
        let model = model_file(&dir);
        let mut args = vec![model.as_str()];
        args.extend_from_slice(flags);
        let cli = parse(&args);

        assert!(validate(&cli).is_ok());
        let err = build_config(&cli).unwrap_err();
        assert_eq!(err.downcast_ref::<ModelConfigError>(), Some(&expected));
    }

    #[test]
    fn test_build_config_loads_names_file() {
        let dir = TempDir::new().unwrap();
        let names = dir.path().join("names.txt");
        fs::write(&names, "helmet\nvest\n").unwrap();
        let model = model_file(&dir);
        let cli = parse(&[model.as_str(), "--names", names.to_str().unwrap()]);

        let config = build_config(&cli).unwrap();
        assert_eq!(config.class_names().len(), 2);
        assert_eq!(config.class_names().name(1), "vest");
    }
}
