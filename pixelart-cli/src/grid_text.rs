//! Plain-text grids: 16 lines of 16 hex digits, one digit per pixel.
//!
//! Whitespace inside a line is ignored and lines starting with `#` are
//! comments, so grids can be laid out and annotated by hand.

use anyhow::{ensure, Context, Result};
use pixelart::codec::{PixelGrid, GRID_SIZE};

pub fn parse(text: &str) -> Result<PixelGrid> {
    let mut indices = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    for (row, line) in rows.enumerate() {
        let digits: Vec<u8> = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .with_context(|| format!("row {row}: '{c}' is not a hex digit"))
            })
            .collect::<Result<_>>()?;
        ensure!(
            digits.len() == GRID_SIZE,
            "row {} has {} pixels, expected {}",
            row,
            digits.len(),
            GRID_SIZE
        );
        indices.extend(digits);
    }

    ensure!(
        indices.len() == GRID_SIZE * GRID_SIZE,
        "grid has {} rows, expected {}",
        indices.len() / GRID_SIZE,
        GRID_SIZE
    );
    Ok(PixelGrid::from_indices(&indices)?)
}

pub fn format(grid: &PixelGrid) -> String {
    let mut out = String::with_capacity(GRID_SIZE * (GRID_SIZE + 1));
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            out.push(char::from_digit(grid.get(x, y) as u32, 16).unwrap_or('?'));
        }
        out.push('\n');
    }
    out
}
