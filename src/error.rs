use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidCharacter { position: usize, code_point: u32 },
    LsbCountOutOfRange(u8),
    ImageShapeMismatch {
        grayscale_requested: bool,
        image_is_grayscale: bool,
    },
    ValueOutOfRange { value: u16, lsb_count: u8 },
    SampleCountMismatch { expected: usize, actual: usize },
    UnsupportedInputFormat(String),
    UnsupportedOutputFormat(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToReadMessageFile(String, std::io::Error),
    UnableToWriteMessageFile(String, std::io::Error),
    UnableToDecodeImage(String, image::ImageError),
    UnableToEncodeImage(String, image::ImageError),
    MessageInputClosed,
    FailedToReadMessageInput(std::io::Error),
}

impl Error {
    /// Whether the error rejects the caller's options before any sample is touched.
    pub fn is_invalid_options(&self) -> bool {
        matches!(
            self,
            Self::LsbCountOutOfRange(_) | Self::ImageShapeMismatch { .. }
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter {
                position,
                code_point,
            } => {
                write!(
                    f,
                    "Character U+{:04X} at position {} is not 7-bit ASCII",
                    code_point, position
                )
            }
            Self::LsbCountOutOfRange(count) => {
                write!(
                    f,
                    "The number of least significant bits must be between 1 and 8, but was {}",
                    count
                )
            }
            Self::ImageShapeMismatch {
                grayscale_requested,
                image_is_grayscale,
            } => {
                let describe = |grayscale: bool| if grayscale { "grayscale" } else { "color" };
                write!(
                    f,
                    "Options request a {} image, but the image is {}",
                    describe(*grayscale_requested),
                    describe(*image_is_grayscale)
                )
            }
            Self::ValueOutOfRange { value, lsb_count } => {
                write!(
                    f,
                    "Value {} does not fit into {} least significant bits",
                    value, lsb_count
                )
            }
            Self::SampleCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Number of samples does not match the image size. Expected {}, but got {}.",
                    expected, actual
                )
            }
            Self::UnsupportedInputFormat(path) => {
                write!(f, "The format of the input file '{}' is not supported", path)
            }
            Self::UnsupportedOutputFormat(path) => {
                write!(
                    f,
                    "The format of the output file '{}' is not supported",
                    path
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToReadMessageFile(path, error) => {
                write!(f, "Unable to read message file '{}': {}", path, error)
            }
            Self::UnableToWriteMessageFile(path, error) => {
                write!(f, "Unable to write message file '{}': {}", path, error)
            }
            Self::UnableToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::UnableToEncodeImage(path, error) => {
                write!(f, "Unable to encode image '{}': {}", path, error)
            }
            Self::MessageInputClosed => {
                write!(f, "Message input was closed before a valid message was read")
            }
            Self::FailedToReadMessageInput(error) => {
                write!(f, "Failed to read message input: {}", error)
            }
        }
    }
}

impl std::error::Error for Error {}
