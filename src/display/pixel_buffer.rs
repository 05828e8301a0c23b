// ============================================================================
// Utility Functions
// ============================================================================

/// Write a packed RGBA8888 color to slice in native byte order,
/// which is what an SDL `RGBA8888` texture expects
#[inline]
fn write_pixel(dest: &mut [u8], rgba: u32) {
    dest.copy_from_slice(&rgba.to_ne_bytes());
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering
/// This is the canvas the fire is colorized into before upload
#[derive(Clone)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer, cleared to transparent black
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 4
    }

    /// Bytes per row, as SDL wants it for texture uploads
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Fill every pixel with one packed color
    pub fn clear(&mut self, rgba: u32) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            write_pixel(chunk, rgba);
        }
    }

    /// Set pixel by linear index (row-major). Out-of-range indices are ignored.
    #[inline]
    pub fn put(&mut self, index: usize, rgba: u32) {
        let offset = index * 4;
        if let Some(dest) = self.pixels.get_mut(offset..offset + 4) {
            write_pixel(dest, rgba);
        }
    }

    /// Read a packed pixel by linear index
    ///
    /// # Panics
    /// Panics if `index` is out of range
    #[inline]
    pub fn pixel(&self, index: usize) -> u32 {
        let offset = index * 4;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.pixels[offset..offset + 4]);
        u32::from_ne_bytes(bytes)
    }

    /// Copy another buffer of the same size into this one.
    /// Returns false (and copies nothing) on a size mismatch.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.pixels.copy_from_slice(&other.pixels);
        true
    }

    // ========================================================================
    // Raw Access
    // ========================================================================

    /// Get raw pixel data for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
