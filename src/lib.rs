mod bin_streams;
mod compression_format;
mod compositor;
mod dat_archive;
mod endian_aware_io;
mod errors;
mod frm;
mod palette;
mod texture;
mod zlib;

pub mod export;

#[cfg(test)]
mod utils;

pub use bin_streams::ByteReader;
pub use compression_format::CompressionFormat;
pub use compositor::{compose, render_first_frame, render_frame};
pub use dat_archive::{resolve_index_location, DatArchive, DatEntry};
pub use endian_aware_io::Endian;
pub use frm::{Frm, DIRECTION_COUNT, HEADER_SIZE};
pub use palette::{Brightness, Palette, Rgb, COLOR_COUNT, PALETTE_SIZE};
pub use texture::Texture;
pub use zlib::ZlibCompressionFormat;

pub use errors::{
    ByteReaderError, CompositeError, CompressionError, DatError, ExportError, FrmError,
    PaletteError, TextureError,
};
