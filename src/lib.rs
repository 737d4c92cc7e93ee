use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use ::image::ImageFormat;

use crate::image::{
    reader::{LoadMode, RasterImageReader},
    writer::RasterImageWriter,
    Image, ImageReader, ImageWriter,
};
pub use cli::CLIParser;
pub use error::Error;
use message::RecoveryPolicy;
use message_source::MessageSource;
use pipeline::{Embedder, EmbeddingOptions, Extractor, InsufficientCapacity};

pub mod binary_stream;
mod cli;
mod error;
pub mod image;
mod logger;
pub mod lsb;
pub mod message;
pub mod message_source;
pub mod pipeline;

pub type Result<T> = std::result::Result<T, error::Error>;

const COVER_EXTENSIONS: &[&str] = &["png", "bmp", "tiff", "tif", "jpg", "jpeg"];
const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "msg", "doc"];

/// Channels a color image may carry payload in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelFlags {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

pub enum Arguments {
    Encode(EncodeArguments),
    Decode(DecodeArguments),
}

pub struct EncodeArguments {
    input_file: PathBuf,
    output_file: PathBuf,
    lsb_count: u8,
    gray: bool,
    channels: ChannelFlags,
    message_source: MessageSource,
}

pub struct DecodeArguments {
    input_file: PathBuf,
    output_file: PathBuf,
    lsb_count: u8,
    gray: bool,
    channels: ChannelFlags,
    max_characters: Option<usize>,
    recovery_policy: RecoveryPolicy,
}

/// Outcome of hiding text, reported back to the user
#[derive(Clone, Debug)]
pub struct EncodeSummary {
    pub capacity_characters: usize,
    pub written_characters: usize,
    pub shortfall: Option<InsufficientCapacity>,
    pub distance: f64,
}

fn path_name(file_path: &Path) -> String {
    file_path.display().to_string()
}

fn extension_of(file_path: &Path) -> Option<String> {
    file_path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
}

fn has_extension(file_path: &Path, extensions: &[&str]) -> bool {
    extension_of(file_path).is_some_and(|extension| extensions.contains(&extension.as_str()))
}

fn check_input_format(file_path: &Path, extensions: &[&str]) -> Result<()> {
    if !has_extension(file_path, extensions) {
        return Err(Error::UnsupportedInputFormat(path_name(file_path)));
    }
    if has_extension(file_path, LOSSY_EXTENSIONS) {
        log::warn!(
            "'{}' is stored lossy, hidden bits may already be corrupted",
            path_name(file_path)
        );
    }
    Ok(())
}

fn lossless_output_format(file_path: &Path) -> Result<ImageFormat> {
    match extension_of(file_path).as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("bmp") => Ok(ImageFormat::Bmp),
        Some("tif" | "tiff") => Ok(ImageFormat::Tiff),
        _ => Err(Error::UnsupportedOutputFormat(path_name(file_path))),
    }
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_name(file_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_name(file_path), e))
}

fn load_mode(gray: bool) -> LoadMode {
    if gray {
        LoadMode::Grayscale
    } else {
        LoadMode::Detect
    }
}

fn read_image(file_path: &Path, mode: LoadMode) -> Result<Image> {
    let input_file = open_input_file(file_path)?;
    let mut reader =
        RasterImageReader::new(BufReader::new(input_file), path_name(file_path), mode);
    reader.read_image()
}

fn write_image(file_path: &Path, format: ImageFormat, image: &Image) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    let mut writer =
        RasterImageWriter::new(BufWriter::new(output_file), path_name(file_path), format);
    writer.write_image(image)
}

fn embedding_options(
    lsb_count: u8,
    channels: ChannelFlags,
    image: &Image,
) -> EmbeddingOptions {
    EmbeddingOptions {
        lsb_count,
        include_red: channels.red,
        include_green: channels.green,
        include_blue: channels.blue,
        grayscale: image.is_grayscale(),
    }
}

fn log_options(options: &EmbeddingOptions) {
    if options.grayscale {
        log::info!(
            "Using the {} least significant bit(s) of each grayscale pixel",
            options.lsb_count
        );
    } else {
        log::info!(
            "Using the {} least significant bit(s) of the {} channel(s) of each pixel",
            options.lsb_count,
            options.channel_names()
        );
    }
}

/// Hide the text named by the arguments in a copy of the input image.
pub fn hide_text_in_image(arguments: &EncodeArguments) -> Result<EncodeSummary> {
    check_input_format(&arguments.input_file, COVER_EXTENSIONS)?;
    let output_format = lossless_output_format(&arguments.output_file)?;
    let cover = read_image(&arguments.input_file, load_mode(arguments.gray))?;
    let options = embedding_options(arguments.lsb_count, arguments.channels, &cover);
    log_options(&options);

    let capacity_characters =
        pipeline::capacity_characters(cover.width(), cover.height(), &options);
    let text = arguments.message_source.read(capacity_characters)?;
    let embedding = Embedder::new(&options).embed(&cover, &text)?;
    let shortfall = embedding.insufficient_capacity();
    let written_characters =
        message::character_count(message::bit_count(text.len()) - embedding.unwritten_bits());
    let distance = cover.distance(embedding.image());

    write_image(&arguments.output_file, output_format, embedding.image())?;
    log::info!("The result is saved as '{}'", path_name(&arguments.output_file));
    Ok(EncodeSummary {
        capacity_characters,
        written_characters,
        shortfall,
        distance,
    })
}

/// Read hidden text from the input image and store it in the output file.
pub fn reveal_text_from_image(arguments: &DecodeArguments) -> Result<String> {
    check_input_format(&arguments.input_file, COVER_EXTENSIONS)?;
    if !has_extension(&arguments.output_file, TEXT_EXTENSIONS) {
        return Err(Error::UnsupportedOutputFormat(path_name(
            &arguments.output_file,
        )));
    }
    let image = read_image(&arguments.input_file, load_mode(arguments.gray))?;
    let options = embedding_options(arguments.lsb_count, arguments.channels, &image);
    log_options(&options);

    let text = Extractor::new(&options)
        .with_max_characters(arguments.max_characters)
        .with_recovery_policy(arguments.recovery_policy)
        .extract(&image)?;
    fs::write(&arguments.output_file, &text)
        .map_err(|e| Error::UnableToWriteMessageFile(path_name(&arguments.output_file), e))?;
    log::info!(
        "The obtained message was saved to '{}'",
        path_name(&arguments.output_file)
    );
    Ok(text)
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use ::image::ImageFormat;

    use super::{check_input_format, lossless_output_format, COVER_EXTENSIONS};
    use crate::error::Error;

    #[test]
    fn accept_cover_formats() {
        for name in ["a.png", "b.BMP", "c.tiff", "d.jpg", "e.JPEG"] {
            assert!(
                check_input_format(Path::new(name), COVER_EXTENSIONS).is_ok(),
                "{} must be accepted",
                name
            );
        }
    }

    #[test]
    fn reject_unknown_input_format() {
        assert!(matches!(
            check_input_format(Path::new("cover.gif"), COVER_EXTENSIONS),
            Err(Error::UnsupportedInputFormat(_))
        ));
        assert!(check_input_format(Path::new("no_extension"), COVER_EXTENSIONS).is_err());
    }

    #[test]
    fn output_must_be_lossless() {
        assert_eq!(
            lossless_output_format(Path::new("out.png")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            lossless_output_format(Path::new("out.tif")).unwrap(),
            ImageFormat::Tiff
        );
        assert!(matches!(
            lossless_output_format(Path::new("out.jpg")),
            Err(Error::UnsupportedOutputFormat(_))
        ));
    }
}
