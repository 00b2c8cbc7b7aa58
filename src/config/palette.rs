// Tile colors and the drag palette.

/// RGBA color represented as f32 components in [0.0, 1.0] range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl Color {
    /// Fully transparent black.
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    /// Create a Color from f32 RGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string (e.g. "#3F7FE0") into an opaque Color.
    ///
    /// Accepts 6-digit hex with leading '#'. Case-insensitive.
    /// Returns None on any other format.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        })
    }

    /// Format as "#RRGGBB", dropping alpha.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Default palette, in the order the swatches are presented.
pub const DEFAULT_PALETTE: &[&str] = &["#3F7FE0", "#F06C9B", "#F5C542", "#4CB782", "#F08A3C"];

/// The ordered set of colors a user can drag onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at a swatch index, if any.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| Color::from_hex(hex))
                .collect(),
        )
    }
}
