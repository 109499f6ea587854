use crate::pixel::Pixel;

/// Largest palette an 8-bit index can address.
pub const MAX_COLORS: usize = 256;

/// A palette image: one color-table index per pixel, row-major.
///
/// A fresh image is filled with index 0, so whatever color is allocated
/// first becomes the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    palette: Vec<Pixel>,
    indices: Vec<u8>,
}
impl IndexedImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            palette: Vec::new(),
            indices: vec![0; width as usize * height as usize],
        }
    }

    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        palette: Vec<Pixel>,
        indices: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            palette,
            indices,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &[Pixel] {
        &self.palette
    }

    /// Row-major palette indices.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Appends `color` to the palette and returns its index, or `None` once
    /// the palette is full. Equal colors get separate entries.
    pub fn allocate_color(&mut self, color: Pixel) -> Option<u8> {
        if self.palette.len() >= MAX_COLORS {
            return None;
        }
        self.palette.push(color);
        u8::try_from(self.palette.len() - 1).ok()
    }

    /// Points `(x, y)` at palette entry `index`. Coordinates outside the
    /// image are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, index: u8) {
        if let Some(offset) = self.offset(x, y) {
            self.indices[offset] = index;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.offset(x, y).map(|offset| self.indices[offset])
    }

    /// Resolves the pixel at `(x, y)` through the palette.
    pub fn color(&self, x: u32, y: u32) -> Option<Pixel> {
        self.palette.get(self.pixel(x, y)? as usize).copied()
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.indices.chunks(self.width.max(1) as usize)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}
