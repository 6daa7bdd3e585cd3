//! Nibble packing between 16x16 palette-index grids and 128-byte buffers.
//!
//! Pixel `2i` lands in the high nibble of byte `i` and pixel `2i + 1` in the
//! low nibble, so the transform is a bijection between valid grids and all
//! 128-byte buffers.

use crate::error::CodecError;
use crate::palette::PALETTE_SIZE;

/// Canvas edge length in pixels.
pub const GRID_SIZE: usize = 16;
/// Pixels per grid.
pub const PIXEL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Bytes per packed image.
pub const PACKED_LEN: usize = PIXEL_COUNT / 2;

/// 256 palette indices in row-major order (`index = y * 16 + x`).
///
/// Every value is below 16; the constructors enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelGrid([u8; PIXEL_COUNT]);

impl Default for PixelGrid {
    fn default() -> Self {
        Self([0; PIXEL_COUNT])
    }
}

impl PixelGrid {
    /// Validate raw palette indices.
    pub fn from_indices(indices: &[u8]) -> Result<Self, CodecError> {
        if indices.len() != PIXEL_COUNT {
            return Err(CodecError::GridLength(indices.len()));
        }
        let mut cells = [0u8; PIXEL_COUNT];
        for (position, (&value, cell)) in indices.iter().zip(cells.iter_mut()).enumerate() {
            if value as usize >= PALETTE_SIZE {
                return Err(CodecError::PaletteIndex { position, value });
            }
            *cell = value;
        }
        Ok(Self(cells))
    }

    /// A grid with every pixel set to `index`.
    pub fn filled(index: u8) -> Result<Self, CodecError> {
        if index as usize >= PALETTE_SIZE {
            return Err(CodecError::PaletteIndex { position: 0, value: index });
        }
        Ok(Self([index; PIXEL_COUNT]))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Get the palette index at (x, y). Both coordinates must be below 16.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < GRID_SIZE && y < GRID_SIZE, "pixel ({x}, {y}) out of range");
        self.0[y * GRID_SIZE + x]
    }

    /// Palette index at (x, y), or `None` off the canvas.
    pub fn try_get(&self, x: usize, y: usize) -> Option<u8> {
        if x < GRID_SIZE && y < GRID_SIZE {
            Some(self.0[y * GRID_SIZE + x])
        } else {
            None
        }
    }

    /// Set the pixel at row-major `position`.
    pub fn set(&mut self, position: usize, index: u8) -> Result<(), CodecError> {
        if index as usize >= PALETTE_SIZE {
            return Err(CodecError::PaletteIndex { position, value: index });
        }
        let cell = self
            .0
            .get_mut(position)
            .ok_or(CodecError::Position(position % GRID_SIZE, position / GRID_SIZE))?;
        *cell = index;
        Ok(())
    }

    /// Pack into the on-chain layout. Infallible on a validated grid.
    pub fn pack(&self) -> PackedImage {
        let mut bytes = [0u8; PACKED_LEN];
        for (byte, pair) in bytes.iter_mut().zip(self.0.chunks_exact(2)) {
            *byte = (pair[0] << 4) | (pair[1] & 0x0F);
        }
        PackedImage(bytes)
    }
}

/// 128 bytes, two pixels per byte, high nibble first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedImage([u8; PACKED_LEN]);

impl Default for PackedImage {
    fn default() -> Self {
        Self([0; PACKED_LEN])
    }
}

impl PackedImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; PACKED_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::PackedLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn unpack(&self) -> PixelGrid {
        let mut cells = [0u8; PIXEL_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            let byte = self.0[i / 2];
            *cell = if i % 2 == 0 { (byte >> 4) & 0x0F } else { byte & 0x0F };
        }
        PixelGrid(cells)
    }

    /// `0x`-prefixed lowercase hex, two digits per byte.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a hex payload; the `0x` prefix is optional and either case is accepted.
    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| CodecError::Hex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

/// Pack raw palette indices, rejecting bad lengths and out-of-range values.
pub fn encode(indices: &[u8]) -> Result<PackedImage, CodecError> {
    Ok(PixelGrid::from_indices(indices)?.pack())
}

/// Unpack a raw 128-byte buffer.
pub fn decode(bytes: &[u8]) -> Result<PixelGrid, CodecError> {
    Ok(PackedImage::from_bytes(bytes)?.unpack())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_grid() -> Vec<u8> {
        let mut g = vec![0u8; PIXEL_COUNT];
        g[0] = 5;
        g[255] = 9;
        g
    }

    #[test]
    fn corner_pixels_land_in_expected_nibbles() {
        let packed = encode(&corner_grid()).unwrap();
        let bytes = packed.as_bytes();
        assert_eq!(bytes.len(), PACKED_LEN);
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[127], 0x09);
        assert!(bytes[1..127].iter().all(|&b| b == 0));

        let grid = packed.unpack();
        assert_eq!(grid.as_slice(), corner_grid().as_slice());
    }

    #[test]
    fn encode_rejects_wrong_length() {
        assert_eq!(encode(&[0u8; 255]), Err(CodecError::GridLength(255)));
        assert_eq!(encode(&[0u8; 257]), Err(CodecError::GridLength(257)));
        assert_eq!(encode(&[]), Err(CodecError::GridLength(0)));
    }

    #[test]
    fn encode_rejects_out_of_range_index() {
        let mut g = vec![0u8; PIXEL_COUNT];
        g[17] = 16;
        assert_eq!(
            encode(&g),
            Err(CodecError::PaletteIndex { position: 17, value: 16 })
        );
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(decode(&[0u8; 127]), Err(CodecError::PackedLength(127)));
        assert_eq!(decode(&[0u8; 256]), Err(CodecError::PackedLength(256)));
    }

    #[test]
    fn get_is_row_major() {
        let mut grid = PixelGrid::default();
        grid.set(3 * GRID_SIZE + 2, 7).unwrap();
        assert_eq!(grid.get(2, 3), 7);
        assert_eq!(grid.get(3, 2), 0);
    }

    #[test]
    fn try_get_stays_on_canvas() {
        let mut grid = PixelGrid::default();
        grid.set(GRID_SIZE, 7).unwrap();
        assert_eq!(grid.try_get(0, 1), Some(7));
        assert_eq!(grid.try_get(16, 0), None);
        assert_eq!(grid.try_get(0, 16), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn get_does_not_wrap_rows() {
        let mut grid = PixelGrid::default();
        grid.set(GRID_SIZE, 7).unwrap();
        grid.get(16, 0);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut grid = PixelGrid::default();
        assert!(matches!(grid.set(0, 16), Err(CodecError::PaletteIndex { .. })));
        assert!(matches!(grid.set(256, 1), Err(CodecError::Position(0, 16))));
    }

    #[test]
    fn hex_is_prefixed_lowercase_and_padded() {
        let packed = encode(&corner_grid()).unwrap();
        let hex = packed.to_hex();
        assert_eq!(hex.len(), 2 + 2 * PACKED_LEN);
        assert!(hex.starts_with("0x50000000"));
        assert!(hex.ends_with("0009"));
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(PackedImage::from_hex(&hex).unwrap(), packed);
    }

    #[test]
    fn from_hex_accepts_uppercase_and_no_prefix() {
        let mut bytes = [0u8; PACKED_LEN];
        bytes[5] = 0xAB;
        let expected = PackedImage::from_bytes(&bytes).unwrap();
        let upper = format!("0X{}", hex::encode_upper(bytes));
        let bare = hex::encode(bytes);
        assert_eq!(PackedImage::from_hex(&upper).unwrap(), expected);
        assert_eq!(PackedImage::from_hex(&bare).unwrap(), expected);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(PackedImage::from_hex("0xzz"), Err(CodecError::Hex(_))));
        assert!(matches!(PackedImage::from_hex("0xabc"), Err(CodecError::Hex(_))));
        assert_eq!(
            PackedImage::from_hex("0x00ff"),
            Err(CodecError::PackedLength(2))
        );
    }
}
