use crate::codec::{PackedImage, PixelGrid, GRID_SIZE};
use crate::error::CodecError;
use crate::palette::{self, Rgb, PALETTE_SIZE};

/// Paint-by-click editor state: a canvas and the selected palette color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    grid: PixelGrid,
    selected: u8,
}

impl Editor {
    /// All-black canvas with black selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing packed image.
    pub fn from_packed(image: &PackedImage) -> Self {
        Self {
            grid: image.unpack(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn selected_color(&self) -> Rgb {
        palette::PALETTE[self.selected as usize]
    }

    pub fn select_color(&mut self, index: u8) -> Result<(), CodecError> {
        if index as usize >= PALETTE_SIZE {
            return Err(CodecError::PaletteIndex { position: 0, value: index });
        }
        self.selected = index;
        Ok(())
    }

    /// Paint the pixel at row-major `position` with the selected color.
    pub fn paint(&mut self, position: usize) -> Result<PackedImage, CodecError> {
        self.grid.set(position, self.selected)?;
        Ok(self.packed())
    }

    pub fn paint_at(&mut self, x: usize, y: usize) -> Result<PackedImage, CodecError> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(CodecError::Position(x, y));
        }
        self.paint(y * GRID_SIZE + x)
    }

    /// Reset every pixel to black; the selected color is kept.
    pub fn clear(&mut self) -> PackedImage {
        self.grid = PixelGrid::default();
        self.packed()
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn packed(&self) -> PackedImage {
        self.grid.pack()
    }
}
