//! Hex color parsing.

/// RGB color with components in `0.0..=1.0`, as PDF `rg` operands expect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Parse `#rgb` or `#rrggbb` (case-insensitive, surrounding whitespace ignored).
    ///
    /// ```
    /// use slides_pdf::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#fff"), Some(Rgb { r: 1.0, g: 1.0, b: 1.0 }));
    /// assert_eq!(Rgb::parse("#000000"), Some(Rgb { r: 0.0, g: 0.0, b: 0.0 }));
    /// assert_eq!(Rgb::parse("red"), None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v) / 255.0);
        match hex.len() {
            3 => {
                let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
                Self::parse(&format!("#{doubled}"))
            }
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => None,
        }
    }

    /// Color from a 24-bit `0xRRGGBB` literal.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Channels are at most 255
    pub const fn from_hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as f32 / 255.0,
            g: ((value >> 8) & 0xff) as f32 / 255.0,
            b: (value & 0xff) as f32 / 255.0,
        }
    }
}
