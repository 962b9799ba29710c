use std::fmt;

/// An RGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Unpack a 0xRRGGBB integer; bits above 23 are ignored
    pub const fn from_packed(value: u32) -> Self {
        Color {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Build from floating point channels on a 0-255 scale, truncating
    /// toward zero and clamping out-of-range values.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Color {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Hexcone HSV to RGB. All inputs are in [0, 1]; hue wraps.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        if s <= 0.0 {
            return Color::from_f64(v * 255.0, v * 255.0, v * 255.0);
        }

        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Color::from_f64(r * 255.0, g * 255.0, b * 255.0)
    }

    /// Fully saturated color for a hue given in degrees
    pub fn from_hue_degrees(hue: u32) -> Self {
        Color::from_hsv((hue % 360) as f64 / 360.0, 1.0, 1.0)
    }
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(0.0, 255.0) as u8
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::from_packed(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
