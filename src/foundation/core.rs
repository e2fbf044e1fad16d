use crate::foundation::error::{InterfacerError, InterfacerResult};

pub use kurbo::Point;

/// Pixel size of the display surface the grid is laid over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> InterfacerResult<Self> {
        if width == 0 || height == 0 {
            return Err(InterfacerError::validation(
                "display extent width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn rect(self) -> GridRect {
        GridRect::new(0, 0, self.width, self.height)
    }
}

/// Pixel-space rectangle, origin at the top-left of the display.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(self, p: Point) -> bool {
        p.x >= f64::from(self.x)
            && p.y >= f64::from(self.y)
            && p.x < f64::from(self.right())
            && p.y < f64::from(self.bottom())
    }

    /// A `width` x `height` rect centred inside `self`, clamped so it never overflows.
    pub fn centered(self, width: u32, height: u32) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
