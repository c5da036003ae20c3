//! Cell grid overlay
//!
//! A grid splits a `pixel_width x pixel_height` area into `cols x rows`
//! cells. Filling a cell only records its color and marks it dirty;
//! [`Grid::draw`] later paints the dirty cells onto a [`Surface`], so the
//! cost of a redraw is proportional to the number of changed cells rather
//! than the size of the grid.
//!
//! Cell sizes never use floating point: every axis is split into
//! `total / count` pixels per cell and the remainder is handed out one pixel
//! at a time to the leading cells, so the extents always add up to the
//! exact pixel size.

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::color::Color;
use crate::display::{Display, Rect};
use crate::error::{try_alloc, GfxError};
use crate::surface::Surface;

/// Offset and size of cell `index` when `total` pixels are split across
/// `count` cells.
pub fn span(total: u32, count: u32, index: u32) -> (u32, u32) {
    let base = total / count;
    let rem = total % count;
    let offset = index * base + index.min(rem);
    let size = base + u32::from(index < rem);
    (offset, size)
}

/// Walks the cells of one axis with a running offset and remainder carry
struct Spans {
    offset: u32,
    base: u32,
    carry: u32,
    left: u32,
}

impl Spans {
    fn new(total: u32, count: u32) -> Self {
        Self {
            offset: 0,
            base: total / count,
            carry: total % count,
            left: count,
        }
    }
}

impl Iterator for Spans {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.left == 0 {
            return None;
        }
        self.left -= 1;
        let mut size = self.base;
        if self.carry > 0 {
            size += 1;
            self.carry -= 1;
        }
        let offset = self.offset;
        self.offset += size;
        Some((offset, size))
    }
}

/// Per-cell colors, either owned by the grid or borrowed from the caller
#[derive(Debug)]
enum ColorTable<'a> {
    Owned(Vec<Color>),
    Borrowed(&'a mut [Color]),
}

impl Deref for ColorTable<'_> {
    type Target = [Color];

    fn deref(&self) -> &[Color] {
        match self {
            ColorTable::Owned(colors) => colors,
            ColorTable::Borrowed(colors) => colors,
        }
    }
}

impl DerefMut for ColorTable<'_> {
    fn deref_mut(&mut self) -> &mut [Color] {
        match self {
            ColorTable::Owned(colors) => colors,
            ColorTable::Borrowed(colors) => colors,
        }
    }
}

#[derive(Debug)]
pub struct Grid<'a> {
    pixel_width: u32,
    pixel_height: u32,
    cols: u32,
    rows: u32,
    colors: ColorTable<'a>,
    dirty: Vec<bool>,
}

impl<'a> Grid<'a> {
    /// Create a grid. With `initial_colors` the grid writes through to the
    /// caller's table instead of allocating its own. Every cell starts
    /// dirty so the first draw paints the whole grid.
    pub fn create(
        pixel_width: u32,
        pixel_height: u32,
        cols: u32,
        rows: u32,
        initial_colors: Option<&'a mut [Color]>,
    ) -> Result<Self, GfxError> {
        if cols == 0 || rows == 0 {
            return Err(GfxError::invalid(format!(
                "grid needs at least one cell, got {cols}x{rows}"
            )));
        }
        if pixel_width == 0 || pixel_height == 0 {
            return Err(GfxError::invalid(format!(
                "grid pixel size {pixel_width}x{pixel_height} must be non-zero"
            )));
        }
        let cells = cols as usize * rows as usize;
        let colors = match initial_colors {
            Some(table) if table.len() != cells => {
                return Err(GfxError::invalid(format!(
                    "color table has {} entries, grid has {cells} cells",
                    table.len()
                )));
            }
            Some(table) => ColorTable::Borrowed(table),
            None => ColorTable::Owned(try_alloc("grid color table", cells, Color::BLACK)?),
        };
        let dirty = try_alloc("grid dirty table", cells, true)?;
        debug!("Created {cols}x{rows} grid over {pixel_width}x{pixel_height} pixels");
        Ok(Self {
            pixel_width,
            pixel_height,
            cols,
            rows,
            colors,
            dirty,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    pub fn color(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.colors[i])
    }

    pub fn is_dirty(&self, x: u32, y: u32) -> bool {
        self.index(x, y).is_some_and(|i| self.dirty[i])
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|&&d| d).count()
    }

    /// Record a cell's color and mark it dirty. No pixels are written.
    pub fn fill_cell(&mut self, x: u32, y: u32, color: Color) -> Result<(), GfxError> {
        let i = self.index(x, y).ok_or_else(|| {
            GfxError::invalid(format!(
                "cell ({x}, {y}) outside {}x{} grid",
                self.cols, self.rows
            ))
        })?;
        self.colors[i] = color;
        self.dirty[i] = true;
        Ok(())
    }

    /// Reset every cell to black and mark it dirty
    pub fn clear_all(&mut self) {
        self.colors.fill(Color::BLACK);
        self.dirty.fill(true);
    }

    /// Pixel rectangle of a cell, relative to the grid origin
    pub fn cell_rect(&self, x: u32, y: u32) -> Option<Rect> {
        self.index(x, y)?;
        let (left, width) = span(self.pixel_width, self.cols, x);
        let (top, height) = span(self.pixel_height, self.rows, y);
        Some(Rect::new(left, top, width, height))
    }

    /// Paint dirty cells onto the surface and clear their flags. Returns
    /// how many cells were repainted.
    pub fn draw(
        &mut self,
        surface: &mut Surface,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<usize, GfxError> {
        let mut drawn = 0;
        for (row, (top, height)) in Spans::new(self.pixel_height, self.rows).enumerate() {
            for (col, (left, width)) in Spans::new(self.pixel_width, self.cols).enumerate() {
                let i = row * self.cols as usize + col;
                if !self.dirty[i] {
                    continue;
                }
                self.dirty[i] = false;
                let x = origin_x.saturating_add(left);
                let y = origin_y.saturating_add(top);
                if width == 0 || height == 0 || !surface.contains(x, y) {
                    continue;
                }
                surface.fill_rect(x, y, width, height, self.colors[i])?;
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// Present one cell, padded by a pixel on every side so no stale edge is
    /// left between neighbouring cells.
    pub fn present_cell(
        &self,
        surface: &Surface,
        display: &mut dyn Display,
        origin_x: u32,
        origin_y: u32,
        x: u32,
        y: u32,
    ) -> Result<(), GfxError> {
        let cell = self.cell_rect(x, y).ok_or_else(|| {
            GfxError::invalid(format!(
                "cell ({x}, {y}) outside {}x{} grid",
                self.cols, self.rows
            ))
        })?;
        let area = Rect::new(
            origin_x.saturating_add(cell.x),
            origin_y.saturating_add(cell.y),
            cell.width,
            cell.height,
        )
        .padded(1);
        surface.present_region(display, area.x, area.y, area.width, area.height)
    }

    /// Tear the grid down. Owned tables are freed; a borrowed table is
    /// handed back to the caller with its final colors.
    pub fn delete(self) -> Option<&'a mut [Color]> {
        debug!("Deleting {}x{} grid", self.cols, self.rows);
        match self.colors {
            ColorTable::Owned(_) => None,
            ColorTable::Borrowed(table) => Some(table),
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.cols && y < self.rows).then(|| y as usize * self.cols as usize + x as usize)
    }
}
