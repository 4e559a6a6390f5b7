use crate::display::domain::annotation::Annotation;
use crate::shared::frame::Frame;

/// Presents annotated frames and reports key presses.
pub trait FrameDisplay: Send {
    /// Draws `annotations` onto the frame and shows the result.
    fn show(
        &mut self,
        frame: &Frame,
        annotations: &[Annotation],
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `timeout_ms` for a key; `None` when nothing was pressed.
    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<i32>, Box<dyn std::error::Error>>;

    /// Tears the window down. Safe to call more than once.
    fn close(&mut self);
}
