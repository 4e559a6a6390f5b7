use opencv::core::{Mat, Point, Scalar};
use opencv::highgui;
use opencv::imgproc;

use crate::display::domain::annotation::Annotation;
use crate::display::domain::frame_display::FrameDisplay;
use crate::shared::constants::{
    BOX_THICKNESS, LABEL_FONT_SCALE, LABEL_THICKNESS, OVERLAY_COLOR,
};
use crate::shared::frame::Frame;
use crate::video::infrastructure::mat_conversion::bgr_mat_from_frame;

/// Single OpenCV `highgui` window.
///
/// Boxes and labels are rendered with `imgproc` on a BGR copy of the frame.
/// The window is destroyed on `close()` or when the display is dropped.
pub struct HighGuiDisplay {
    title: String,
    open: bool,
}

impl HighGuiDisplay {
    pub fn new(title: &str) -> Result<Self, Box<dyn std::error::Error>> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        log::info!("Opened window \"{title}\"");
        Ok(Self {
            title: title.to_string(),
            open: true,
        })
    }
}

fn overlay_color() -> Scalar {
    let [r, g, b] = OVERLAY_COLOR;
    Scalar::new(b as f64, g as f64, r as f64, 0.0)
}

fn draw_annotations(canvas: &mut Mat, annotations: &[Annotation]) -> opencv::Result<()> {
    let color = overlay_color();
    for annotation in annotations {
        let bbox = annotation.bbox;
        imgproc::rectangle_points(
            canvas,
            Point::new(bbox.x1, bbox.y1),
            Point::new(bbox.x2, bbox.y2),
            color,
            BOX_THICKNESS,
            imgproc::LINE_8,
            0,
        )?;
        let (x, y) = annotation.label_origin;
        imgproc::put_text(
            canvas,
            &annotation.label,
            Point::new(x, y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            LABEL_FONT_SCALE,
            color,
            LABEL_THICKNESS,
            imgproc::LINE_8,
            false,
        )?;
    }
    Ok(())
}

impl FrameDisplay for HighGuiDisplay {
    fn show(
        &mut self,
        frame: &Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !self.open {
            return Err(format!("Window \"{}\" is closed", self.title).into());
        }
        let mut canvas = bgr_mat_from_frame(frame)?;
        draw_annotations(&mut canvas, annotations)?;
        highgui::imshow(&self.title, &canvas)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(timeout_ms)?;
        Ok((key >= 0).then_some(key))
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("Failed to close window \"{}\": {e}", self.title);
        }
    }
}

impl Drop for HighGuiDisplay {
    fn drop(&mut self) {
        self.close();
    }
}
