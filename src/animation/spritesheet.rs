use image::RgbaImage;

use crate::foundation::{core::GridRect, error::DiagnosticKind};

/// Size of one sprite inside a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SpriteGeometry {
    pub sprite_width: u32,
    pub sprite_height: u32,
}

impl SpriteGeometry {
    /// Rejects non-positive sides before any sheet is seen.
    pub fn new(sprite_width: i64, sprite_height: i64) -> Result<Self, DiagnosticKind> {
        let invalid = || invalid_sides(sprite_width as f64, sprite_height as f64);
        let w = u32::try_from(sprite_width).map_err(|_| invalid())?;
        let h = u32::try_from(sprite_height).map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }
        Ok(Self {
            sprite_width: w,
            sprite_height: h,
        })
    }

    /// Sides as declared in a description. Fractional, non-finite and non-positive values are
    /// rejected with the value as written.
    pub fn from_declared(sprite_width: f64, sprite_height: f64) -> Result<Self, DiagnosticKind> {
        let whole = |v: f64| v.is_finite() && v.fract() == 0.0 && v > 0.0 && v <= f64::from(u32::MAX);
        if !whole(sprite_width) || !whole(sprite_height) {
            return Err(invalid_sides(sprite_width, sprite_height));
        }
        Self::new(sprite_width as i64, sprite_height as i64)
    }

    /// `(columns, rows)` of whole sprites that fit a `sheet_width` x `sheet_height` sheet.
    pub fn grid(self, sheet_width: u32, sheet_height: u32) -> (u32, u32) {
        (
            sheet_width / self.sprite_width,
            sheet_height / self.sprite_height,
        )
    }

    pub fn frame_count(self, sheet_width: u32, sheet_height: u32) -> u32 {
        let (cols, rows) = self.grid(sheet_width, sheet_height);
        cols * rows
    }

    /// Source region of frame `k` in a sheet with `cols` sprites per row.
    pub fn frame_rect(self, k: u32, cols: u32) -> GridRect {
        let row = k / cols;
        let col = k % cols;
        GridRect::new(
            col * self.sprite_width,
            row * self.sprite_height,
            self.sprite_width,
            self.sprite_height,
        )
    }
}

fn invalid_sides(sprite_width: f64, sprite_height: f64) -> DiagnosticKind {
    DiagnosticKind::InvalidSpritesheetGeometry {
        sprite_width,
        sprite_height,
        sheet_width: 0,
        sheet_height: 0,
    }
}

/// Cut a sheet into row-major frames. Partial sprites at the right/bottom edge are dropped.
pub fn slice_spritesheet(
    sheet: &RgbaImage,
    geometry: SpriteGeometry,
) -> Result<Vec<RgbaImage>, DiagnosticKind> {
    let (sheet_width, sheet_height) = sheet.dimensions();
    let (cols, rows) = geometry.grid(sheet_width, sheet_height);
    if cols == 0 || rows == 0 {
        return Err(DiagnosticKind::InvalidSpritesheetGeometry {
            sprite_width: f64::from(geometry.sprite_width),
            sprite_height: f64::from(geometry.sprite_height),
            sheet_width,
            sheet_height,
        });
    }

    let frames = (0..cols * rows)
        .map(|k| {
            let r = geometry.frame_rect(k, cols);
            image::imageops::crop_imm(sheet, r.x, r.y, r.width, r.height).to_image()
        })
        .collect();
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spritesheet.rs"]
mod tests;
