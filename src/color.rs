use rand::Rng;
use scarlet::color::{Color, RGBColor};
use scarlet::colors::HSLColor;

/// 8-bit sRGB triple handed to a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
    Orange,
}

impl NamedColor {
    pub const ALL: [NamedColor; 6] = [
        NamedColor::Red,
        NamedColor::Blue,
        NamedColor::Yellow,
        NamedColor::Green,
        NamedColor::Purple,
        NamedColor::Orange,
    ];

    // CSS keyword values.
    pub fn rgb(self) -> Rgb {
        match self {
            NamedColor::Red => Rgb::new(255, 0, 0),
            NamedColor::Blue => Rgb::new(0, 0, 255),
            NamedColor::Yellow => Rgb::new(255, 255, 0),
            NamedColor::Green => Rgb::new(0, 128, 0),
            NamedColor::Purple => Rgb::new(128, 0, 128),
            NamedColor::Orange => Rgb::new(255, 165, 0),
        }
    }
}

/// Color of a single spark: either one of the fixed palette entries or a
/// procedurally chosen hue rendered at full saturation and 70% lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireworkColor {
    Named(NamedColor),
    Hue(f32),
}

impl FireworkColor {
    pub const HUE_SATURATION: f64 = 1.0;
    pub const HUE_LIGHTNESS: f64 = 0.7;

    pub fn rgb(self) -> Rgb {
        match self {
            FireworkColor::Named(named) => named.rgb(),
            FireworkColor::Hue(hue) => {
                let hsl = HSLColor {
                    h: (hue as f64).rem_euclid(360.0),
                    s: Self::HUE_SATURATION,
                    l: Self::HUE_LIGHTNESS,
                };
                let rgb: RGBColor = hsl.convert();
                Rgb::new(rgb.int_r(), rgb.int_g(), rgb.int_b())
            }
        }
    }
}

/// The colors one burst draws from: the six named colors plus a hue that is
/// rolled once when the palette is built.
#[derive(Debug, Clone)]
pub struct BurstPalette {
    hue: f32,
    entries: [FireworkColor; 7],
}

impl BurstPalette {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hue = rng.gen_range(0.0..360.0);
        Self::with_hue(hue)
    }

    pub fn with_hue(hue: f32) -> Self {
        let named = NamedColor::ALL.map(FireworkColor::Named);
        Self {
            hue,
            entries: [
                named[0],
                named[1],
                named[2],
                named[3],
                named[4],
                named[5],
                FireworkColor::Hue(hue),
            ],
        }
    }

    pub fn entries(&self) -> &[FireworkColor] {
        &self.entries
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Uniform draw over all seven entries.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> FireworkColor {
        self.entries[rng.gen_range(0..self.entries.len())]
    }
}
