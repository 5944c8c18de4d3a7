use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Input is not compressed using {0}.")]
    InvalidInput(String),

    #[error("Decompressed to {actual} bytes but the entry declares {expected}.")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Unable to allocate {0} bytes for decompressed output.")]
    AllocationFailure(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ByteReaderError {
    #[error("Read of {requested} bytes at '0x{position:x}' runs past the end of a buffer of size '0x{size:x}'.")]
    OutOfBounds {
        position: usize,
        requested: usize,
        size: usize,
    },
}

#[derive(Error, Debug)]
pub enum DatError {
    #[error("The archive index is corrupt: {0}")]
    CorruptIndex(String),

    #[error("Entry '{name}' is truncated: expected {expected} bytes, found {actual}.")]
    TruncatedPayload {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to decompress entry '{0}'.")]
    DecompressionFailed(String, #[source] CompressionError),

    #[error("No entry named '{0}' exists in the archive.")]
    NotFound(String),

    #[error("Unable to allocate {0} bytes.")]
    AllocationFailure(usize),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FrmError {
    #[error("Malformed FRM header: {0}")]
    MalformedHeader(String),

    #[error("Direction {direction} frame {frame} does not exist in this sprite.")]
    OutOfRange { direction: usize, frame: usize },

    #[error("Frame at offset '0x{offset:x}' with length {length} overruns pixel data of size '0x{size:x}'.")]
    FrameOutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },
}

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("A palette needs at least 768 bytes but only {0} were provided.")]
    Malformed(usize),
}

#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("Expected {expected} palette indices for the frame but found {actual}.")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    FrmError(#[from] FrmError),
}

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Cannot write an image with no pixels.")]
    Empty,

    #[error("Pixel buffer of {actual} bytes does not match a {width}x{height} RGB image.")]
    BufferSize {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error(transparent)]
    ImageError(#[from] image::ImageError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid entry pattern '{0}'.")]
    InvalidPattern(String),

    #[error("Output '{0}' was already written by another sprite.")]
    NameCollision(String),

    #[error(transparent)]
    DatError(#[from] DatError),

    #[error(transparent)]
    FrmError(#[from] FrmError),

    #[error(transparent)]
    PaletteError(#[from] PaletteError),

    #[error(transparent)]
    CompositeError(#[from] CompositeError),

    #[error(transparent)]
    TextureError(#[from] TextureError),

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
