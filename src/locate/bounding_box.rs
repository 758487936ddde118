/// Tight rectangle around the ink, in source-image pixel coordinates.
///
/// Half-open: `x0..x1` by `y0..y1`. A single ink pixel at (x, y) yields
/// `x1 = x + 1, y1 = y + 1`, so a box is never zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    /// Box covering the single pixel (x, y).
    pub fn pixel(x: u32, y: u32) -> BoundingBox {
        BoundingBox { x0: x, y0: y, x1: x + 1, y1: y + 1 }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Grows the box so it also covers (x, y).
    pub fn include(&mut self, x: u32, y: u32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x + 1);
        self.y1 = self.y1.max(y + 1);
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}
