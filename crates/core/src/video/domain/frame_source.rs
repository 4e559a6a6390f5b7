use crate::shared::frame::Frame;

/// Pulls frames from a camera or stream.
///
/// Implementations handle device and codec details while the detection
/// loop works with the abstract `Frame` type.
pub trait FrameSource: Send {
    /// Returns the next frame, or `None` once the source has no more frames.
    ///
    /// An `Err` means the backend itself failed.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the underlying device. Safe to call more than once.
    fn release(&mut self);
}
