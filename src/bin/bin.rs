use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rodata_assets::{
    load_font, load_sprites, FontOptions, GlyphSampling, OddWidth, SpriteOptions, TailAlignment,
    DEFAULT_ALPHA_THRESHOLD,
};

#[derive(Parser, Debug)]
#[command(
    name = "rodata-assets",
    about = "Convert font sheets and sprites into fixed layout firmware tables"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a .sfl font descriptor and its sheet into a glyph table blob.
    Font {
        #[arg(value_name = "FILE")]
        descriptor: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Alpha at or above which a pixel is set.
        #[arg(long, value_name = "ALPHA", default_value_t = DEFAULT_ALPHA_THRESHOLD)]
        threshold: u8,

        /// image_origin reads every glyph from the sheet's top-left corner,
        /// glyph_rect from its own rectangle.
        #[arg(long, value_name = "MODE", default_value_t = GlyphSampling::default())]
        sampling: GlyphSampling,

        /// Alignment of the bits in a glyph's last word: msb or lsb.
        #[arg(long, value_name = "ALIGN", default_value_t = TailAlignment::default())]
        tail: TailAlignment,
    },

    /// Encode every image listed in a sprite manifest into a sprite table blob.
    Sprites {
        #[arg(value_name = "FILE")]
        manifest: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Widening of odd sprites: centered (+2) or even (+3).
        #[arg(long, value_name = "POLICY", default_value_t = OddWidth::default())]
        odd_width: OddWidth,
    },
}

fn write_output(path: &Path, blob: &[u8]) -> Result<()> {
    fs::write(path, blob).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match args.command {
        Command::Font {
            descriptor,
            output,
            threshold,
            sampling,
            tail,
        } => {
            let options = FontOptions {
                alpha_threshold: threshold,
                sampling,
                tail,
            };
            let table = load_font(&descriptor, &options)
                .with_context(|| format!("Failed to convert font {}", descriptor.display()))?;

            write_output(&output, &table.to_blob()?)?;
            println!(
                "{}: {} glyphs, {} words, first glyph {}",
                output.display(),
                table.glyphs.len(),
                table.data.len(),
                table.first_glyph.unwrap_or(0)
            );
        }
        Command::Sprites {
            manifest,
            output,
            odd_width,
        } => {
            let table = load_sprites(&manifest, &SpriteOptions { odd_width })
                .with_context(|| format!("Failed to convert sprites {}", manifest.display()))?;

            write_output(&output, &table.to_blob()?)?;
            println!(
                "{}: {} sprites, {} indices, {} bytes",
                output.display(),
                table.sprites.len(),
                table.index_count,
                table.data.len()
            );
        }
    }

    Ok(())
}
