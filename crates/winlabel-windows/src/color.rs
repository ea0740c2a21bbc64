/// An RGB color parsed from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parses a hex color string like "#1e1e2e" or "1e1e2e".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        // Byte slicing below needs ASCII.
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Parses `hex`, falling back to `default` on bad input.
    pub fn from_hex_or(hex: &str, default: Self) -> Self {
        Self::from_hex(hex).unwrap_or(default)
    }

    /// Converts to a GDI `COLORREF` value (0x00BBGGRR).
    pub fn to_colorref(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }
}
