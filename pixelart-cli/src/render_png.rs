//! PNG output for packed images.

use anyhow::{Context, Result};
use pixelart::codec::{PixelGrid, GRID_SIZE};
use pixelart::render;
use std::path::Path;

/// Largest output edge, in pixels.
pub const MAX_SIDE: usize = 16_384;

/// Check that `scale` and `border` give a non-empty image within [`MAX_SIDE`].
pub fn check_size(scale: usize, border: usize) -> Result<usize> {
    anyhow::ensure!(scale > 0, "scale must be at least 1");
    let cells = border
        .checked_mul(2)
        .and_then(|b| b.checked_add(GRID_SIZE))
        .context("border too large")?;
    let side = cells
        .checked_mul(scale)
        .filter(|&side| side <= MAX_SIDE)
        .with_context(|| format!("image edge exceeds {MAX_SIDE} pixels"))?;
    Ok(side)
}

/// Write a grid as an RGBA PNG, `scale` pixels per cell, with a white
/// border `border` cells wide.
pub fn write_grid_png(grid: &PixelGrid, scale: usize, border: usize, path: &Path) -> Result<()> {
    let side = check_size(scale, border)?;
    let inner = render::to_rgba(grid, scale);
    let inner_side = GRID_SIZE * scale;

    // White background
    let mut pixels = vec![255u8; side * side * 4];
    let offset = border * scale;
    for y in 0..inner_side {
        let src = &inner[y * inner_side * 4..(y + 1) * inner_side * 4];
        let dst_start = ((y + offset) * side + offset) * 4;
        pixels[dst_start..dst_start + inner_side * 4].copy_from_slice(src);
    }

    write_rgba_png(path, &pixels, side, side)
}

fn write_rgba_png(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header for {}", path.display()))?;
    writer
        .write_image_data(pixels)
        .with_context(|| format!("writing PNG data for {}", path.display()))?;

    Ok(())
}
