//! PNG decode/encode for the CLI boundary.
//!
//! Decoding expands any 8-bit color type to RGBA; encoding uses fixed
//! compression settings so identical buffers produce byte-identical files.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use spritegrid_core::PixelBuffer;

/// Decode a PNG from raw file bytes into an RGBA pixel buffer.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let mut decoder = png::Decoder::new(bytes);
    // Expand palette and low-bit-depth images up front.
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().context("failed to read PNG header")?;
    let mut data = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut data)
        .context("failed to decode PNG image data")?;
    data.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        bail!("unsupported PNG bit depth {:?}: only 8-bit is supported", info.bit_depth);
    }

    let rgba = match info.color_type {
        ColorType::Rgba => data,
        ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => bail!("unsupported PNG color type {other:?}"),
    };

    PixelBuffer::from_rgba8(info.width, info.height, &rgba)
        .context("decoded PNG has inconsistent dimensions")
}

/// Read and decode a PNG file, returning the buffer and the raw file bytes
/// (the bytes feed content hashing).
pub fn load(path: &Path) -> Result<(PixelBuffer, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let buffer = decode(&bytes).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok((buffer, bytes))
}

/// Write a buffer as RGBA PNG with deterministic encoder settings.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    write_to(buffer, writer)
}

fn write_to<W: Write>(buffer: &PixelBuffer, writer: W) -> Result<()> {
    let mut encoder = Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    // No filtering keeps output byte-identical across encoder versions.
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header().context("failed to write PNG header")?;
    png_writer
        .write_image_data(&buffer.to_rgba8())
        .context("failed to write PNG image data")?;
    Ok(())
}
