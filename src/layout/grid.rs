use crate::{
    foundation::core::{Extent, GridRect, Point},
    foundation::error::{DiagnosticKind, InterfacerError, InterfacerResult},
    scene::model::Dimension,
};

/// Row-major grid laid over a display extent.
///
/// Cell sides are `extent / count` rounded down; the remainder goes to the last row and the last
/// column, so the cells tile the extent exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    rows: u32,
    columns: u32,
    extent: Extent,
}

/// Row/column address of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CellAddress {
    pub index: u64,
    pub row: u32,
    pub col: u32,
}

impl GridLayout {
    /// Fails only for a grid where no rect could be computed at all.
    pub fn new(rows: i64, columns: i64, extent: Extent) -> InterfacerResult<Self> {
        if rows <= 0 || columns <= 0 {
            return Err(InterfacerError::validation(format!(
                "grid must have rows>0 and columns>0, got {rows}x{columns}"
            )));
        }
        let rows = u32::try_from(rows)
            .map_err(|_| InterfacerError::validation(format!("grid rows {rows} too large")))?;
        let columns = u32::try_from(columns).map_err(|_| {
            InterfacerError::validation(format!("grid columns {columns} too large"))
        })?;
        if extent.width == 0 || extent.height == 0 {
            return Err(InterfacerError::validation(
                "display extent width/height must be > 0",
            ));
        }
        if rows > extent.height || columns > extent.width {
            tracing::warn!(
                rows,
                columns,
                width = extent.width,
                height = extent.height,
                "grid is finer than the display, some cells have zero size"
            );
        }
        Ok(Self {
            rows,
            columns,
            extent,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }

    pub fn address(&self, index: i64) -> Result<CellAddress, DiagnosticKind> {
        let invalid = || DiagnosticKind::InvalidCellIndex {
            index,
            cells: self.cell_count(),
        };
        let index = u64::try_from(index).map_err(|_| invalid())?;
        if index >= self.cell_count() {
            return Err(invalid());
        }
        let columns = u64::from(self.columns);
        // row < rows and col < columns, so both fit back into u32
        Ok(CellAddress {
            index,
            row: (index / columns) as u32,
            col: (index % columns) as u32,
        })
    }

    pub fn cell_rect(&self, index: i64) -> Result<GridRect, DiagnosticKind> {
        let addr = self.address(index)?;
        let (x, width) = span(self.extent.width, self.columns, addr.col);
        let (y, height) = span(self.extent.height, self.rows, addr.row);
        Ok(GridRect::new(x, y, width, height))
    }

    /// Cell rect with optional size overrides, centred in the cell and clamped to it.
    pub fn component_rect(
        &self,
        index: i64,
        width: Option<Dimension>,
        height: Option<Dimension>,
    ) -> Result<GridRect, DiagnosticKind> {
        let cell = self.cell_rect(index)?;
        let w = width.map_or(cell.width, |d| d.resolve(cell.width));
        let h = height.map_or(cell.height, |d| d.resolve(cell.height));
        Ok(cell.centered(w, h))
    }

    /// Index of the cell containing `p`, if it lies on the display.
    pub fn cell_at(&self, p: Point) -> Option<u64> {
        if !self.extent.rect().contains(p) {
            return None;
        }
        let col = locate(self.extent.width, self.columns, p.x);
        let row = locate(self.extent.height, self.rows, p.y);
        Some(u64::from(row) * u64::from(self.columns) + u64::from(col))
    }
}

fn span(total: u32, parts: u32, i: u32) -> (u32, u32) {
    let base = total / parts;
    let start = base * i;
    if i + 1 == parts {
        (start, total - start)
    } else {
        (start, base)
    }
}

fn locate(total: u32, parts: u32, coord: f64) -> u32 {
    let base = total / parts;
    if base == 0 {
        return parts - 1;
    }
    ((coord.max(0.0) as u32) / base).min(parts - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
