use crate::color::Color;

/// Row-major grid of pixels, overwritten by every render pass
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// Reallocate only when the size actually changes
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK; width * height];
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.index(row, col).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        if let Some(i) = self.index(row, col) {
            self.pixels[i] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks panics on 0; an empty buffer has no rows anyway
        self.pixels.chunks(self.width.max(1))
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Color]> {
        self.pixels.chunks_mut(self.width.max(1))
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }
}
