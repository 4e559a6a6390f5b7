use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::video::domain::capture_source::CaptureSource;
use crate::video::domain::frame_source::FrameSource;

use super::mat_conversion::frame_from_mat;

/// Camera or stream capture through OpenCV's `videoio`.
///
/// The device is released on `release()` or when the capture is dropped.
pub struct OpenCvCapture {
    capture: VideoCapture,
    source: CaptureSource,
    buffer: Mat,
    next_index: usize,
    released: bool,
}

impl OpenCvCapture {
    pub fn open(source: &CaptureSource) -> Result<Self, Box<dyn std::error::Error>> {
        let capture = open_video_capture(source)?;
        log::info!("Opened capture on {source}");
        Ok(Self {
            capture,
            source: source.clone(),
            buffer: Mat::default(),
            next_index: 0,
            released: false,
        })
    }
}

/// Devices try V4L2 first, then whatever backend OpenCV picks.
fn open_video_capture(source: &CaptureSource) -> Result<VideoCapture, Box<dyn std::error::Error>> {
    let backends: &[i32] = match source {
        CaptureSource::Device(_) => &[videoio::CAP_V4L, videoio::CAP_ANY],
        CaptureSource::Uri(_) => &[videoio::CAP_ANY],
    };

    for &backend in backends {
        let attempt = match source {
            CaptureSource::Device(index) => VideoCapture::new(*index, backend),
            CaptureSource::Uri(uri) => VideoCapture::from_file(uri, backend),
        };
        match attempt {
            Ok(cap) => {
                if cap.is_opened()? {
                    return Ok(cap);
                }
                log::debug!("Backend {backend} did not open {source}");
            }
            Err(e) => log::debug!("Backend {backend} failed to open {source}: {e}"),
        }
    }
    Err(format!("Could not open {source}").into())
}

impl FrameSource for OpenCvCapture {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.released {
            return Ok(None);
        }
        let grabbed = self.capture.read(&mut self.buffer)?;
        if !grabbed || self.buffer.empty() {
            return Ok(None);
        }
        let frame = frame_from_mat(&self.buffer, self.next_index)?;
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release {}: {e}", self.source);
        } else {
            log::info!("Released {}", self.source);
        }
    }
}

impl Drop for OpenCvCapture {
    fn drop(&mut self) {
        self.release();
    }
}
