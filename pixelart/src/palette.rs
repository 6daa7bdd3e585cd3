/// Number of colors in the shared palette.
pub const PALETTE_SIZE: usize = 16;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS form, `#RRGGBB` in uppercase.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (either case, `#` optional).
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// The fixed 16-color palette, indexed by palette index.
pub const PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0xFF, 0xFF, 0xFF), // white
    Rgb::new(0xFF, 0x00, 0x00), // red
    Rgb::new(0x00, 0xFF, 0x00), // green
    Rgb::new(0x00, 0x00, 0xFF), // blue
    Rgb::new(0xFF, 0xFF, 0x00), // yellow
    Rgb::new(0xFF, 0x00, 0xFF), // magenta
    Rgb::new(0x00, 0xFF, 0xFF), // cyan
    Rgb::new(0x80, 0x80, 0x80), // gray
    Rgb::new(0xC0, 0xC0, 0xC0), // silver
    Rgb::new(0x80, 0x00, 0x00), // maroon
    Rgb::new(0x80, 0x80, 0x00), // olive
    Rgb::new(0x00, 0x80, 0x00), // dark green
    Rgb::new(0x80, 0x00, 0x80), // purple
    Rgb::new(0x00, 0x80, 0x80), // teal
    Rgb::new(0x00, 0x00, 0x80), // navy
];

/// Color for a palette index, or `None` if the index is out of range.
pub fn color(index: u8) -> Option<Rgb> {
    PALETTE.get(index as usize).copied()
}

/// Exact reverse lookup of a palette color.
pub fn palette_index_of(rgb: Rgb) -> Option<u8> {
    PALETTE.iter().position(|&c| c == rgb).map(|i| i as u8)
}
