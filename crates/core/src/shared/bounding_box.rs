/// Axis-aligned box in frame pixel coordinates, corners inclusive of
/// `(x1, y1)` and exclusive of `(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Restrict the box to a `width` × `height` frame.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let max_x = width as i32;
        let max_y = height as i32;
        Self {
            x1: self.x1.clamp(0, max_x),
            y1: self.y1.clamp(0, max_y),
            x2: self.x2.clamp(0, max_x),
            y2: self.y2.clamp(0, max_y),
        }
    }
}
