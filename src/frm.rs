use std::io::Cursor;

use binread::{BinRead, BinReaderExt};

use crate::FrmError;

type Result<T> = std::result::Result<T, FrmError>;

pub const DIRECTION_COUNT: usize = 6;
pub const HEADER_SIZE: usize = 62;

#[derive(BinRead, Debug, Clone)]
#[br(big)]
struct FrmHeader {
    version: u32,
    fps: u16,
    action_frame: u16,
    animation_length: u16,
    x_origin: [i16; DIRECTION_COUNT],
    y_origin: [i16; DIRECTION_COUNT],
    animation_start: [u32; DIRECTION_COUNT],
    data_length: u32,
    width: u16,
    height: u16,
    // Declared by the format but never used for decoding.
    size: u32,
    x: u16,
    y: u16,
}

/// A palette-indexed sprite with up to six directions of animation frames.
#[derive(Debug, Clone)]
pub struct Frm {
    header: FrmHeader,
    data: Vec<u8>,
}

impl Frm {
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() < HEADER_SIZE {
            return Err(FrmError::MalformedHeader(format!(
                "expected at least {} bytes but found {}",
                HEADER_SIZE,
                raw.len()
            )));
        }
        let mut cursor = Cursor::new(raw);
        let header: FrmHeader = cursor
            .read_be()
            .map_err(|e| FrmError::MalformedHeader(format!("{:?}", e)))?;

        let length = header.data_length as usize;
        let data = raw
            .get(HEADER_SIZE..)
            .and_then(|pixels| pixels.get(..length))
            .ok_or_else(|| {
                FrmError::MalformedHeader(format!(
                    "header declares {} bytes of pixel data but only {} follow",
                    header.data_length,
                    raw.len() - HEADER_SIZE
                ))
            })?
            .to_vec();
        Ok(Frm { header, data })
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn fps(&self) -> u16 {
        self.header.fps
    }

    pub fn action_frame(&self) -> u16 {
        self.header.action_frame
    }

    pub fn animation_length(&self) -> u16 {
        self.header.animation_length
    }

    pub fn x_origins(&self) -> &[i16; DIRECTION_COUNT] {
        &self.header.x_origin
    }

    pub fn y_origins(&self) -> &[i16; DIRECTION_COUNT] {
        &self.header.y_origin
    }

    pub fn animation_starts(&self) -> &[u32; DIRECTION_COUNT] {
        &self.header.animation_start
    }

    pub fn data_length(&self) -> u32 {
        self.header.data_length
    }

    pub fn width(&self) -> u16 {
        self.header.width
    }

    pub fn height(&self) -> u16 {
        self.header.height
    }

    pub fn declared_size(&self) -> u32 {
        self.header.size
    }

    pub fn anchor_x(&self) -> u16 {
        self.header.x
    }

    pub fn anchor_y(&self) -> u16 {
        self.header.y
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of palette indices in one frame.
    pub fn frame_size(&self) -> usize {
        self.header.width as usize * self.header.height as usize
    }

    pub fn frame_pixels(&self, direction: usize, frame: usize) -> Result<&[u8]> {
        if direction >= DIRECTION_COUNT || frame >= self.header.animation_length as usize {
            return Err(FrmError::OutOfRange { direction, frame });
        }
        let frame_size = self.frame_size();
        let offset = (self.header.animation_start[direction] as usize)
            .saturating_add(frame.saturating_mul(frame_size));
        let end = offset.saturating_add(frame_size);
        if end > self.data.len() {
            return Err(FrmError::FrameOutOfBounds {
                offset,
                length: frame_size,
                size: self.data.len(),
            });
        }
        Ok(&self.data[offset..end])
    }

    pub fn first_frame(&self) -> Result<&[u8]> {
        self.frame_pixels(0, 0)
    }
}
