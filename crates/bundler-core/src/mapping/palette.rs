//! Magma palettes and hex colors.

use serde::{Serialize, Serializer};

/// Number of entries in the full continuous palette.
pub const CONTINUOUS_PALETTE_SIZE: usize = 256;

/// Color used for rows whose label is missing.
pub const NO_DATA_COLOR: Rgb = Rgb::new(128, 128, 128);

/// An opaque RGB color, serialized as `#rrggbb`.
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

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<colorous::Color> for Rgb {
    fn from(c: colorous::Color) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// `n` colors evenly spaced along the magma gradient, dark to light.
///
/// Entries are picked from the 256-step palette at `floor(i * 255 / (n - 1))`
/// so that small palettes are exact subsets of the full one.
pub fn magma(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![magma_step(0)],
        _ => (0..n)
            .map(|i| magma_step(i * (CONTINUOUS_PALETTE_SIZE - 1) / (n - 1)))
            .collect(),
    }
}

/// The full 256-step magma palette.
pub fn magma256() -> Vec<Rgb> {
    magma(CONTINUOUS_PALETTE_SIZE)
}

fn magma_step(step: usize) -> Rgb {
    colorous::MAGMA
        .eval_rational(step, CONTINUOUS_PALETTE_SIZE)
        .into()
}
