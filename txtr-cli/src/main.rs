use argh::FromArgs;
use image::{ImageFormat, RgbaImage};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use txtr::{
    DecodeOptions, EncodeOptions, PaletteFormat, PaletteSizeTarget, TextureContainer,
    TextureFormat,
};

/// TXTR texture encoder and decoder.
#[derive(FromArgs)]
struct Cli {
    /// log every step
    #[argh(switch, short = 'v')]
    verbose: bool,
    /// only log errors
    #[argh(switch, short = 'q')]
    quiet: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
    Info(Info),
}

/// Decodes a TXTR texture into one PNG per mipmap level.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// decode every mipmap level instead of just the base level
    #[argh(switch, short = 'm')]
    mipmaps: bool,
    /// prepended to the output file names
    #[argh(option, default = "String::new()")]
    prefix: String,
    /// inserted between the input name and the level number
    #[argh(option, default = "String::new()")]
    suffix: String,
    /// overwrite existing files
    #[argh(switch, short = 'f')]
    force: bool,

    /// the input file
    #[argh(positional)]
    input: String,
    /// the output directory, created when missing (default: current directory)
    #[argh(positional)]
    output: Option<String>,
}

/// Encodes an image as a TXTR texture.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// input format, optional (png, jpg, bmp, tiff)
    #[argh(option)]
    format: Option<Format>,
    /// texture format (I4, I8, IA4, IA8, CI4, CI8, CI14X2, RGB565, RGB5A3, RGBA32, CMPR)
    #[argh(option, short = 't', default = "TextureFormat::RGBA32")]
    texture_format: TextureFormat,
    /// palette format of indexed textures (IA8, RGB565, RGB5A3)
    #[argh(option, short = 'p', default = "PaletteFormat::RGB5A3")]
    palette_format: PaletteFormat,
    /// palette header dimension that holds the entry count (width, height)
    #[argh(option, default = "PaletteSizeTarget::Width")]
    palette_size: PaletteSizeTarget,
    /// generate mipmaps
    #[argh(switch, short = 'm')]
    mipmaps: bool,
    /// smallest mipmap width
    #[argh(option, default = "4")]
    width_limit: u32,
    /// smallest mipmap height
    #[argh(option, default = "4")]
    height_limit: u32,
    /// overwrite an existing output file
    #[argh(switch, short = 'f')]
    force: bool,

    /// the input image
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

/// Prints the header of a TXTR texture.
#[derive(FromArgs)]
#[argh(subcommand, name = "info")]
struct Info {
    /// the input file
    #[argh(positional)]
    input: String,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Png,
    Jpg,
    Bmp,
    Tiff,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
               .or_else(|| s.eq_ignore_ascii_case("tiff").then_some(Format::Tiff))
        else { return Err("invalid string"); };

        Ok(format)
    }
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpg => ImageFormat::Jpeg,
            Format::Bmp => ImageFormat::Bmp,
            Format::Tiff => ImageFormat::Tiff,
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        verbose,
        quiet,
        command,
    } = argh::from_env();
    init_logging(verbose, quiet);

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
        Command::Info(options) => info(options),
    }
}

fn check_overwrite(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(());
    }
    if !force {
        return Err(format!("`{}` already exists, pass --force to overwrite", path.display()).into());
    }
    warn!("Overwriting `{}`", path.display());
    Ok(())
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode {
        format,
        texture_format,
        palette_format,
        palette_size,
        mipmaps,
        width_limit,
        height_limit,
        force,
        input,
        output,
    } = options;

    check_overwrite(Path::new(&output), force)?;

    let image = match format {
        Some(format) => {
            image::io::Reader::with_format(BufReader::new(File::open(&input)?), format.into())
                .decode()?
        }
        None => image::io::Reader::open(&input)?
            .with_guessed_format()?
            .decode()?,
    };

    let image = image.into_rgba8();
    info!(
        "Encoding {}x{} image `{input}` as {texture_format}",
        image.width(),
        image.height()
    );
    if texture_format.is_indexed() {
        debug!("Palette format {palette_format}, size stored in {palette_size:?}");
    }

    let options = EncodeOptions {
        texture_format,
        palette_format,
        palette_size_target: palette_size,
        generate_mipmaps: mipmaps,
        mipmap_width_limit: width_limit,
        mipmap_height_limit: height_limit,
    };
    let bytes = txtr::encode_with_progress(&image, &options, |done, total| {
        info!("mipmap {done}/{total} done")
    })?;

    fs::write(&output, &bytes)?;
    info!("Written {} bytes to `{output}`", bytes.len());

    Ok(())
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode {
        mipmaps,
        prefix,
        suffix,
        force,
        input,
        output,
    } = options;

    info!("Decoding `{input}`");
    let reader = BufReader::new(File::open(&input)?);
    let levels = txtr::decode_with_progress(
        reader,
        &DecodeOptions {
            read_all_mipmaps: mipmaps,
        },
        |done, total| info!("mipmap {done}/{total} done"),
    )?;

    let output = output.map_or_else(|| PathBuf::from("."), PathBuf::from);
    if !output.is_dir() {
        debug!("Creating `{}`", output.display());
        fs::create_dir_all(&output)?;
    }

    let stem = Path::new(&input)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let paths: Vec<_> = (1..=levels.len())
        .map(|level| output.join(format!("{prefix}{stem}{suffix}{level}.png")))
        .collect();
    write_levels(&levels, &paths, force)
}

/// Writes one PNG per level. Nothing is written unless every path may be written.
fn write_levels(
    levels: &[RgbaImage],
    paths: &[PathBuf],
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for path in paths {
        check_overwrite(path, force)?;
    }

    for (image, path) in levels.iter().zip(paths) {
        image.save_with_format(path, ImageFormat::Png)?;
        info!(
            "Written {}x{} image to `{}`",
            image.width(),
            image.height(),
            path.display()
        );
    }

    Ok(())
}

fn info(options: Info) -> Result<(), Box<dyn std::error::Error>> {
    let Info { input } = options;

    let mut reader = BufReader::new(File::open(&input)?);
    let container = TextureContainer::read_from(&mut reader, true)?;
    let header = container.header;

    println!("{input}");
    println!("  format:   {} (0x{:X})", header.format, header.format.code());
    println!("  size:     {}x{}", header.width, header.height);
    println!("  mipmaps:  {}", header.mipmap_count);

    if let Some(palette) = &container.palette {
        let palette = palette.header;
        println!(
            "  palette:  {} (0x{:X}), {}x{}, {} entries",
            palette.format,
            palette.format.code(),
            palette.width,
            palette.height,
            palette.entry_count()
        );
    }

    for (level, data) in (0u32..).zip(&container.mipmaps) {
        let (width, height) = header.level_dimensions(level)?;
        println!("  level {level}:  {width}x{height}, {} bytes", data.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("txtr-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn existing_later_level_blocks_every_write() {
        let dir = scratch_dir("blocked");
        let levels = [RgbaImage::new(4, 4), RgbaImage::new(2, 2)];
        let paths = [dir.join("tex1.png"), dir.join("tex2.png")];
        fs::write(&paths[1], b"keep").unwrap();

        assert!(write_levels(&levels, &paths, false).is_err());
        assert!(!paths[0].exists());
        assert_eq!(fs::read(&paths[1]).unwrap(), b"keep");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn force_overwrites() {
        let dir = scratch_dir("force");
        let levels = [RgbaImage::new(4, 4), RgbaImage::new(2, 2)];
        let paths = [dir.join("tex1.png"), dir.join("tex2.png")];
        fs::write(&paths[1], b"old").unwrap();

        write_levels(&levels, &paths, true).unwrap();
        assert!(paths[0].exists());
        assert_ne!(fs::read(&paths[1]).unwrap(), b"old");

        fs::remove_dir_all(&dir).unwrap();
    }
}
