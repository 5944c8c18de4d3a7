//! Command line front end for inspecting DAT2 archives and dumping sprites.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use dat2::export::{self, RenderOptions, DEFAULT_PALETTE, DEFAULT_SPRITE_PATTERN};
use dat2::{Brightness, DatArchive};

#[derive(Parser, Debug)]
#[command(name = "dat2")]
#[command(about = "Read DAT2 archives and render their FRM sprites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the archive index
    List(ListArgs),
    /// Write one archive member to disk
    Extract(ExtractArgs),
    /// Render one sprite frame to a PNG
    Render(RenderArgs),
    /// Render the first frame of every matching sprite
    DumpAll(DumpAllArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Archive to read
    archive: PathBuf,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Archive to read
    archive: PathBuf,

    /// Member name exactly as stored, e.g. art\scenery\verti01.frm
    entry: String,

    /// Output file
    output: PathBuf,
}

#[derive(Args, Debug)]
struct PaletteArgs {
    /// Palette member used to color the sprite
    #[arg(short, long, default_value = DEFAULT_PALETTE)]
    palette: String,

    /// One of night, morning, afternoon, noon
    #[arg(short, long, default_value = "noon")]
    brightness: Brightness,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Archive to read
    archive: PathBuf,

    /// Sprite member name
    frm: String,

    /// Output PNG
    output: PathBuf,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Facing direction, 0-5
    #[arg(short, long, default_value_t = 0)]
    direction: usize,

    /// Frame within the direction
    #[arg(short, long, default_value_t = 0)]
    frame: usize,
}

#[derive(Args, Debug)]
struct DumpAllArgs {
    /// Archive to read
    archive: PathBuf,

    /// Directory the PNGs are written to
    output: PathBuf,

    #[command(flatten)]
    palette: PaletteArgs,

    /// Case-insensitive glob over member names
    #[arg(long, default_value = DEFAULT_SPRITE_PATTERN)]
    pattern: String,

    /// Exit with an error if any sprite fails to render
    #[arg(long)]
    strict: bool,
}

fn open(path: &Path) -> Result<DatArchive<std::fs::File>> {
    DatArchive::open(path).with_context(|| format!("Failed to open archive {}", path.display()))
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let archive = open(&args.archive)?;
    print!("{}", export::entry_table(&archive));
    archive.close();
    Ok(())
}

fn cmd_extract(args: ExtractArgs) -> Result<()> {
    let archive = open(&args.archive)?;
    let written = export::extract_to_file(&archive, &args.entry, &args.output)
        .with_context(|| format!("Failed to extract {}", args.entry))?;
    println!("{} -> {} ({} bytes)", args.entry, args.output.display(), written);
    archive.close();
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let archive = open(&args.archive)?;
    let options = RenderOptions {
        brightness: args.palette.brightness,
        direction: args.direction,
        frame: args.frame,
    };
    export::dump_frm(
        &archive,
        &args.frm,
        &args.palette.palette,
        &args.output,
        &options,
    )
    .with_context(|| format!("Failed to render {}", args.frm))?;
    println!("{} -> {}", args.frm, args.output.display());
    archive.close();
    Ok(())
}

fn cmd_dump_all(args: DumpAllArgs) -> Result<()> {
    let archive = open(&args.archive)?;
    let options = RenderOptions {
        brightness: args.palette.brightness,
        ..RenderOptions::default()
    };
    let total = export::matching_entries(&archive, &args.pattern)?.len();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?.progress_chars("=> "),
    );

    let report = export::dump_artwork(
        &archive,
        &args.palette.palette,
        &args.output,
        &args.pattern,
        &options,
        |entry| {
            progress.set_message(entry.display_name());
            progress.inc(1);
        },
    )?;
    progress.finish_and_clear();

    println!(
        "Rendered {} sprites into {}",
        report.written.len(),
        args.output.display()
    );
    for (name, err) in &report.failed {
        eprintln!("Failed: {}: {}", name, err);
    }
    archive.close();
    if args.strict && !report.failed.is_empty() {
        bail!("{} sprites failed to render", report.failed.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => cmd_list(args),
        Commands::Extract(args) => cmd_extract(args),
        Commands::Render(args) => cmd_render(args),
        Commands::DumpAll(args) => cmd_dump_all(args),
    }
}
