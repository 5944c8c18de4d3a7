use strum_macros::{Display, EnumIter, EnumString};

use crate::PaletteError;

type Result<T> = std::result::Result<T, PaletteError>;

pub const COLOR_COUNT: usize = 256;
pub const PALETTE_SIZE: usize = COLOR_COUNT * 3;

/// Multiplier applied to every channel when a color is resolved. Stored
/// colors use 6 bits per channel, so `Noon` maps them onto the full 8-bit range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Brightness {
    Night = 1,
    Morning = 2,
    Afternoon = 3,
    Noon = 4,
}

impl Brightness {
    pub fn scale(&self) -> u16 {
        *self as u16
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness::Noon
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone)]
pub struct Palette {
    data: [u8; PALETTE_SIZE],
    brightness: Brightness,
}

impl Palette {
    /// Reads the 256 color entries. Anything past them is left unread.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() < PALETTE_SIZE {
            return Err(PaletteError::Malformed(raw.len()));
        }
        let mut data = [0u8; PALETTE_SIZE];
        data.copy_from_slice(&raw[..PALETTE_SIZE]);
        Ok(Palette {
            data,
            brightness: Brightness::default(),
        })
    }

    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    /// The stored, unscaled triple.
    pub fn raw_color(&self, index: u8) -> Rgb {
        let base = index as usize * 3;
        Rgb {
            r: self.data[base],
            g: self.data[base + 1],
            b: self.data[base + 2],
        }
    }

    /// Scaled color. Channels that would exceed 255 saturate.
    pub fn resolve(&self, index: u8) -> Rgb {
        let raw = self.raw_color(index);
        let scale = self.brightness.scale();
        let apply = |channel: u8| (channel as u16 * scale).min(u8::MAX as u16) as u8;
        Rgb {
            r: apply(raw.r),
            g: apply(raw.g),
            b: apply(raw.b),
        }
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("brightness", &self.brightness)
            .finish()
    }
}
