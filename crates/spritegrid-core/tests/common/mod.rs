//! Shared synthetic sprite-sheet fixtures.

use spritegrid_core::{PixelBuffer, Rgba8};

/// Fully transparent buffer.
pub fn transparent(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::new_transparent(width, height).unwrap()
}

/// Fully opaque buffer.
pub fn opaque(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::filled(width, height, Rgba8::opaque(180, 180, 180)).unwrap()
}

/// Transparent buffer with one opaque square at `(x0, y0)`.
pub fn with_square(width: u32, height: u32, x0: u32, y0: u32, size: u32) -> PixelBuffer {
    let mut pixels = vec![Rgba8::TRANSPARENT; (width * height) as usize];
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            pixels[(y * width + x) as usize] = Rgba8::opaque(255, 255, 255);
        }
    }
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

/// A `columns x rows` sheet of `cell x cell` px cells. Each cell holds an
/// opaque block with a `gutter` px transparent margin at the cell's right
/// and bottom edges, mirroring common sprite-sheet packing.
pub fn grid_sheet(columns: u32, rows: u32, cell: u32, gutter: u32) -> PixelBuffer {
    let width = columns * cell;
    let height = rows * cell;
    let mut pixels = vec![Rgba8::TRANSPARENT; (width * height) as usize];
    for row in 0..rows {
        for col in 0..columns {
            for y in row * cell..(row + 1) * cell - gutter {
                for x in col * cell..(col + 1) * cell - gutter {
                    pixels[(y * width + x) as usize] = Rgba8::opaque(255, 255, 255);
                }
            }
        }
    }
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}
