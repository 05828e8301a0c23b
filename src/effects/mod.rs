mod fire;

pub use fire::{FireSimulator, Flicker};

#[cfg(test)]
pub(crate) use fire::tests::Forced;

/// Color utilities for effects
pub mod color {
    use crate::display::PixelBuffer;

    /// Hottest intensity; also the last palette index
    pub const MAX_INTENSITY: u8 = 31;

    /// Classic DOOM fire ramp as packed RGBA8888, index = intensity
    pub const FIRE_PALETTE: [u32; MAX_INTENSITY as usize + 1] = [
        0x070101FF, 0x1E0101FF, 0x3C0100FF, 0x540100FF, 0x6B0001FF, 0x830100FF, 0x9B0101FF,
        0xB80101FF, 0xD00001FF, 0xE70001FF, 0xFF1C00FF, 0xFF2F00FF, 0xFF4100FF, 0xFF5300FF,
        0xFF6700FF, 0xFF7900FF, 0xFF8B01FF, 0xFF9F01FF, 0xFFB501FF, 0xFFC801FF, 0xFFDA01FF,
        0xFFED00FF, 0xFFFF00FF, 0xDBFF00FF, 0xB3FF00FF, 0x7AFF00FF, 0x2EFF00FF, 0x00FF1EFF,
        0x00FF6BFF, 0x00FFB7FF, 0x00FBFFFF, 0x00AFFFFF,
    ];

    /// Palette lookup, clamping out-of-range intensities to the hottest color
    #[inline]
    pub fn fire_color(intensity: u8) -> u32 {
        FIRE_PALETTE[intensity.min(MAX_INTENSITY) as usize]
    }

    /// Resolve every intensity cell into `frame`.
    /// Cells beyond the frame's pixel count are ignored.
    pub fn colorize(cells: &[u8], frame: &mut PixelBuffer) {
        for (i, &intensity) in cells.iter().enumerate().take(frame.pixel_count()) {
            frame.put(i, fire_color(intensity));
        }
    }

}
