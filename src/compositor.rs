use crate::{CompositeError, Frm, Palette, Texture};

type Result<T> = std::result::Result<T, CompositeError>;

/// Maps palette indices to RGB, keeping the row-major order of the input.
pub fn compose(indices: &[u8], width: usize, height: usize, palette: &Palette) -> Result<Texture> {
    let expected = width * height;
    if indices.len() != expected {
        return Err(CompositeError::DimensionMismatch {
            expected,
            actual: indices.len(),
        });
    }
    let mut pixel_data: Vec<u8> = Vec::with_capacity(expected * 3);
    for index in indices {
        let color = palette.resolve(*index);
        pixel_data.extend_from_slice(&[color.r, color.g, color.b]);
    }
    Ok(Texture {
        filename: String::new(),
        width,
        height,
        pixel_data,
    })
}

pub fn render_frame(
    frm: &Frm,
    direction: usize,
    frame: usize,
    palette: &Palette,
) -> Result<Texture> {
    let indices = frm.frame_pixels(direction, frame)?;
    compose(
        indices,
        frm.width() as usize,
        frm.height() as usize,
        palette,
    )
}

pub fn render_first_frame(frm: &Frm, palette: &Palette) -> Result<Texture> {
    render_frame(frm, 0, 0, palette)
}
