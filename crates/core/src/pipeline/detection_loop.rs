use std::fmt;
use std::time::Instant;

use crate::detection::domain::detection::Detection;
use crate::detection::domain::model_config::ModelConfig;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::display::domain::annotation::Annotation;
use crate::display::domain::frame_display::FrameDisplay;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{EXIT_KEY, INFERENCE_HEIGHT, INFERENCE_WIDTH, KEY_POLL_TIMEOUT_MS};
use crate::video::domain::frame_source::FrameSource;

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    ExitKey,
    EndOfStream,
    CaptureFailed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitKey => f.write_str("exit key pressed"),
            Self::EndOfStream => f.write_str("no more frames"),
            Self::CaptureFailed => f.write_str("capture failed"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: usize,
    pub detections: usize,
    pub stop_reason: StopReason,
}

/// Fixed loop parameters; the defaults reproduce the webcam demo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSettings {
    pub frame_width: u32,
    pub frame_height: u32,
    pub exit_key: i32,
    pub key_poll_timeout_ms: i32,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            frame_width: INFERENCE_WIDTH,
            frame_height: INFERENCE_HEIGHT,
            exit_key: EXIT_KEY,
            key_poll_timeout_ms: KEY_POLL_TIMEOUT_MS,
        }
    }
}

/// Capture → resize → detect → annotate → display → poll key, until the
/// exit key, end of stream, or a capture failure.
///
/// The source is released and the display closed whenever `run` returns,
/// including when detection or display fails.
pub struct DetectionLoop {
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    display: Box<dyn FrameDisplay>,
    config: ModelConfig,
    settings: LoopSettings,
    logger: Box<dyn PipelineLogger>,
}

impl DetectionLoop {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
        display: Box<dyn FrameDisplay>,
        config: ModelConfig,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            display,
            config,
            settings: LoopSettings::default(),
            logger,
        }
    }

    pub fn with_settings(mut self, settings: LoopSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn run(&mut self) -> Result<LoopSummary, Box<dyn std::error::Error>> {
        let result = self.run_frames();

        self.source.release();
        self.display.close();

        match &result {
            Ok(summary) => self.logger.info(&format!(
                "Stopped after {} frames: {}",
                summary.frames, summary.stop_reason
            )),
            Err(e) => self.logger.info(&format!("Stopped on error: {e}")),
        }
        self.logger.summary();
        result
    }

    fn run_frames(&mut self) -> Result<LoopSummary, Box<dyn std::error::Error>> {
        let mut frames = 0;
        let mut detections = 0;
        let summary = |frames, detections, stop_reason| LoopSummary {
            frames,
            detections,
            stop_reason,
        };

        loop {
            let started = Instant::now();
            let frame = match self.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => return Ok(summary(frames, detections, StopReason::EndOfStream)),
                Err(e) => {
                    log::error!("Capture failed: {e}");
                    return Ok(summary(frames, detections, StopReason::CaptureFailed));
                }
            };
            self.logger.timing("capture", elapsed_ms(started));

            let started = Instant::now();
            let frame = frame.resized(self.settings.frame_width, self.settings.frame_height)?;
            self.logger.timing("resize", elapsed_ms(started));

            let started = Instant::now();
            let kept = Detection::above_threshold(
                self.detector.detect(&frame)?,
                self.config.confidence(),
            );
            self.logger.timing("detect", elapsed_ms(started));

            let annotations: Vec<Annotation> = kept
                .iter()
                .map(|d| Annotation::from_detection(d, self.config.class_names()))
                .collect();
            log::debug!("Frame {}: {} detections", frame.index(), annotations.len());

            let started = Instant::now();
            self.display.show(&frame, &annotations)?;
            let key = self.display.poll_key(self.settings.key_poll_timeout_ms)?;
            self.logger.timing("display", elapsed_ms(started));

            frames += 1;
            detections += annotations.len();
            self.logger.metric("detections", annotations.len() as f64);
            self.logger.progress(frames);

            if key == Some(self.settings.exit_key) {
                return Ok(summary(frames, detections, StopReason::ExitKey));
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
