use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use glob::{MatchOptions, Pattern};
use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::compositor::render_frame;
use crate::{Brightness, DatArchive, DatEntry, ExportError, Frm, Palette};

type Result<T> = std::result::Result<T, ExportError>;

pub const DEFAULT_PALETTE: &str = "color.pal";
pub const DEFAULT_SPRITE_PATTERN: &str = "*.frm";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub brightness: Brightness,
    pub direction: usize,
    pub frame: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            brightness: Brightness::Noon,
            direction: 0,
            frame: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct ArtworkReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, ExportError)>,
}

/// Human readable listing of the archive index, one entry per row.
pub fn entry_table<R: Read + Seek>(archive: &DatArchive<R>) -> String {
    let mut table = format!("Contains {} files.\n", archive.len());
    table.push_str(&format!(
        "{:<40} {:>10} {:>8} {:>8} {:>8}\n",
        "Filename", "Compressed", "C-Size", "Size", "Offset"
    ));
    for entry in archive.entries() {
        table.push_str(&format!(
            "{:<40} {:>10} {:>8} {:>8} {:>8}\n",
            entry.display_name(),
            entry.is_compressed() as u8,
            entry.compressed_size(),
            entry.uncompressed_size(),
            entry.offset()
        ));
    }
    table
}

/// Output file name for a sprite: its last path component with a png extension.
pub fn png_name_for(entry: &DatEntry) -> String {
    let (file_name, _) = WINDOWS_1252.decode_without_bom_handling(entry.file_name());
    let file_name = file_name.replace('/', "_");
    Path::new(&file_name)
        .with_extension("png")
        .to_string_lossy()
        .into_owned()
}

pub fn extract_to_file<R, N, P>(archive: &DatArchive<R>, entry_name: N, out_path: P) -> Result<usize>
where
    R: Read + Seek,
    N: AsRef<[u8]>,
    P: AsRef<Path>,
{
    let data = archive.extract_by_name(entry_name)?;
    let out_path = out_path.as_ref();
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_path, &data)?;
    info!("Wrote {} bytes to {}", data.len(), out_path.display());
    Ok(data.len())
}

pub fn load_palette<R, N>(archive: &DatArchive<R>, palette_name: N, brightness: Brightness) -> Result<Palette>
where
    R: Read + Seek,
    N: AsRef<[u8]>,
{
    let raw = archive.extract_by_name(palette_name)?;
    Ok(Palette::from_bytes(&raw)?.with_brightness(brightness))
}

fn render_entry<R: Read + Seek>(
    archive: &DatArchive<R>,
    entry: &DatEntry,
    palette: &Palette,
    options: &RenderOptions,
    out_path: &Path,
) -> Result<()> {
    let raw = archive.extract(entry)?;
    let frm = Frm::from_bytes(&raw)?;
    let mut texture = render_frame(&frm, options.direction, options.frame, palette)?;
    texture.filename = entry.display_name();
    texture.save_png(out_path)?;
    debug!(
        "Rendered {} ({}x{}) to {}",
        texture.filename,
        texture.width,
        texture.height,
        out_path.display()
    );
    Ok(())
}

/// Renders one frame of a sprite through a palette and writes it as a PNG.
pub fn dump_frm<R, F, N, P>(
    archive: &DatArchive<R>,
    frm_name: F,
    palette_name: N,
    out_path: P,
    options: &RenderOptions,
) -> Result<()>
where
    R: Read + Seek,
    F: AsRef<[u8]>,
    N: AsRef<[u8]>,
    P: AsRef<Path>,
{
    let entry = archive.find_entry(frm_name)?;
    let palette = load_palette(archive, palette_name, options.brightness)?;
    render_entry(archive, entry, &palette, options, out_path.as_ref())
}

/// Entries whose full stored name matches `pattern`, ignoring case.
pub fn matching_entries<'a, R: Read + Seek>(
    archive: &'a DatArchive<R>,
    pattern: &str,
) -> Result<Vec<&'a DatEntry>> {
    let compiled =
        Pattern::new(pattern).map_err(|_| ExportError::InvalidPattern(pattern.to_string()))?;
    let match_options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    Ok(archive
        .entries()
        .iter()
        .filter(|e| compiled.matches_with(&e.display_name(), match_options))
        .collect())
}

/// Renders every matching sprite into `out_dir`. A sprite that fails to
/// decode or render is recorded in the report and skipped, as is one whose
/// output name was already taken by an earlier sprite.
pub fn dump_artwork<R, N, P, C>(
    archive: &DatArchive<R>,
    palette_name: N,
    out_dir: P,
    pattern: &str,
    options: &RenderOptions,
    mut on_progress: C,
) -> Result<ArtworkReport>
where
    R: Read + Seek,
    N: AsRef<[u8]>,
    P: AsRef<Path>,
    C: FnMut(&DatEntry),
{
    let palette = load_palette(archive, palette_name, options.brightness)?;
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let mut report = ArtworkReport::default();
    let mut claimed: FxHashSet<String> = FxHashSet::default();
    for entry in matching_entries(archive, pattern)? {
        let png_name = png_name_for(entry);
        let out_path = out_dir.join(&png_name);
        // Sprites are flattened into one directory, and game paths ignore case.
        if !claimed.insert(png_name.to_lowercase()) {
            warn!(
                "Skipping {}: {} was already written by another sprite",
                entry.display_name(),
                out_path.display()
            );
            report.failed.push((
                entry.display_name(),
                ExportError::NameCollision(out_path.display().to_string()),
            ));
            on_progress(entry);
            continue;
        }
        match render_entry(archive, entry, &palette, options, &out_path) {
            Ok(()) => report.written.push(out_path),
            Err(err) => {
                warn!("Skipping {}: {}", entry.display_name(), err);
                report.failed.push((entry.display_name(), err));
            }
        }
        on_progress(entry);
    }
    info!(
        "Rendered {} sprites, {} failed",
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}
