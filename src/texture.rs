use std::convert::TryFrom;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::TextureError;

type Result<T> = std::result::Result<T, TextureError>;

/// An RGB image, three bytes per pixel, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub filename: String,
    pub width: usize,
    pub height: usize,
    pub pixel_data: Vec<u8>,
}

impl Texture {
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let base = (y * self.width + x) * 3;
        let pixel = self.pixel_data.get(base..base + 3)?;
        Some([pixel[0], pixel[1], pixel[2]])
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TextureError::Empty);
        }
        let buffer_size_error = || TextureError::BufferSize {
            width: self.width,
            height: self.height,
            actual: self.pixel_data.len(),
        };
        let width = u32::try_from(self.width).map_err(|_| buffer_size_error())?;
        let height = u32::try_from(self.height).map_err(|_| buffer_size_error())?;
        let image = RgbImage::from_raw(width, height, self.pixel_data.clone())
            .ok_or_else(buffer_size_error)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
