//! The physical display collaborator

use crate::color::Color;
use crate::error::GfxError;

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip against `[0, width) x [0, height)`. Coordinates are computed in
    /// u64 so huge rectangles cannot overflow.
    pub fn clip(&self, width: u32, height: u32) -> Rect {
        if self.x >= width || self.y >= height {
            return Rect::new(self.x.min(width), self.y.min(height), 0, 0);
        }
        let right = (self.x as u64 + self.width as u64).min(width as u64);
        let bottom = (self.y as u64 + self.height as u64).min(height as u64);
        Rect::new(
            self.x,
            self.y,
            (right - self.x as u64) as u32,
            (bottom - self.y as u64) as u32,
        )
    }

    /// Grow by `pad` pixels on every side, saturating at zero
    pub fn padded(&self, pad: u32) -> Rect {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let right = self.x.saturating_add(self.width).saturating_add(pad);
        let bottom = self.y.saturating_add(self.height).saturating_add(pad);
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// A screen that can report its native resolution and accept rectangular
/// copies out of an in-memory pixel buffer.
pub trait Display {
    /// Native (width, height) in pixels
    fn resolution(&self) -> (u32, u32);

    /// Copy `region` out of `buffer` (rows of `stride` pixels) to the same
    /// position on screen. The region is already clipped to the buffer.
    fn blit(&mut self, buffer: &[Color], stride: u32, region: Rect) -> Result<(), GfxError>;
}

/// A display backed by plain memory. It records every blitted region, which
/// makes it the front buffer of the terminal backend and the screen of the
/// tests.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    width: u32,
    height: u32,
    front: Vec<Color>,
    blits: Vec<Rect>,
}

impl MemoryDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            front: vec![Color::BLACK; width as usize * height as usize],
            blits: Vec::new(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.front
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn front(&self) -> &[Color] {
        &self.front
    }

    /// Regions blitted since the last call
    pub fn take_blits(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.blits)
    }

    /// Change the screen size, discarding its contents
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.front = vec![Color::BLACK; width as usize * height as usize];
        self.blits.clear();
    }
}

impl Display for MemoryDisplay {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn blit(&mut self, buffer: &[Color], stride: u32, region: Rect) -> Result<(), GfxError> {
        let region = region.clip(self.width, self.height);
        if region.is_empty() {
            return Ok(());
        }
        for row in region.y..region.y + region.height {
            let src = row as usize * stride as usize + region.x as usize;
            let dst = row as usize * self.width as usize + region.x as usize;
            let len = region.width as usize;
            let source = buffer
                .get(src..src + len)
                .ok_or_else(|| GfxError::display(format!("blit row {row} outside source buffer")))?;
            self.front[dst..dst + len].copy_from_slice(source);
        }
        self.blits.push(region);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_partial() {
        let r = Rect::new(8, 6, 10, 10).clip(10, 8);
        assert_eq!(r, Rect::new(8, 6, 2, 2));
    }

    #[test]
    fn test_clip_outside_is_empty() {
        assert!(Rect::new(12, 0, 4, 4).clip(10, 8).is_empty());
        assert!(Rect::new(0, 8, 4, 4).clip(10, 8).is_empty());
    }

    #[test]
    fn test_clip_does_not_overflow() {
        let r = Rect::new(5, 5, u32::MAX, u32::MAX).clip(10, 10);
        assert_eq!(r, Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_memory_display_copies_region_only() {
        let mut display = MemoryDisplay::new(4, 3);
        let buffer = vec![Color::RED; 12];
        display.blit(&buffer, 4, Rect::new(1, 1, 2, 1)).unwrap();

        assert_eq!(display.pixel(1, 1), Some(Color::RED));
        assert_eq!(display.pixel(2, 1), Some(Color::RED));
        assert_eq!(display.pixel(0, 1), Some(Color::BLACK));
        assert_eq!(display.pixel(1, 0), Some(Color::BLACK));
        assert_eq!(display.take_blits(), vec![Rect::new(1, 1, 2, 1)]);
        assert!(display.take_blits().is_empty());
    }

    #[test]
    fn test_padded_saturates_at_origin() {
        assert_eq!(Rect::new(0, 3, 4, 4).padded(1), Rect::new(0, 2, 5, 6));
        assert_eq!(Rect::new(2, 2, 4, 4).padded(1), Rect::new(1, 1, 6, 6));
    }
}
