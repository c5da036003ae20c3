//! The frame buffer surface: an in-memory back buffer the size of the
//! screen. Drawing only touches memory; [`Surface::present`] and
//! [`Surface::present_region`] copy it to the display.

use log::debug;

use crate::color::Color;
use crate::display::{Display, Rect};
use crate::error::{try_alloc, GfxError};

#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Allocate a black back buffer of `width * height` pixels
    pub fn new(width: u32, height: u32) -> Result<Self, GfxError> {
        if width == 0 || height == 0 {
            return Err(GfxError::invalid(format!(
                "surface size {width}x{height} must be non-zero"
            )));
        }
        let count = width as usize * height as usize;
        let pixels = try_alloc("back buffer", count, Color::BLACK)?;
        debug!("Allocated {width}x{height} back buffer");
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a back buffer matching the display's native resolution
    pub fn for_display(display: &dyn Display) -> Result<Self, GfxError> {
        let (width, height) = display.resolution();
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Paint every pixel black. The display is untouched until the next
    /// present.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::BLACK);
    }

    /// Fill a rectangle. Pixels past the right or bottom edge are skipped;
    /// only an origin outside the surface is an error.
    pub fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), GfxError> {
        if !self.contains(x, y) {
            return Err(GfxError::OriginOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let area = Rect::new(x, y, width, height).clip(self.width, self.height);
        for row in area.y..area.y + area.height {
            let start = self.index(area.x, row);
            self.pixels[start..start + area.width as usize].fill(color);
        }
        Ok(())
    }

    /// Copy the whole back buffer to the display
    pub fn present(&self, display: &mut dyn Display) -> Result<(), GfxError> {
        display.blit(
            &self.pixels,
            self.width,
            Rect::new(0, 0, self.width, self.height),
        )
    }

    /// Copy one region of the back buffer to the display, clipped to the
    /// surface. Prefer this over [`Surface::present`] for localized changes.
    pub fn present_region(
        &self,
        display: &mut dyn Display,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), GfxError> {
        let region = Rect::new(x, y, width, height).clip(self.width, self.height);
        if region.is_empty() {
            return Ok(());
        }
        display.blit(&self.pixels, self.width, region)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
