pub mod reader;
pub mod sequencer;
pub mod writer;

use std::fmt::Display;

use crate::{error::Error, Result};

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self, image: &Image) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Grayscale,
    Rgb,
}

impl ColorMode {
    pub fn channels_per_pixel(&self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
        }
    }
}

/// One color component of an RGB pixel, ordered by write priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn offset(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "R"),
            Self::Green => write!(f, "G"),
            Self::Blue => write!(f, "B"),
        }
    }
}

/// Position of a single sample. `channel` is `None` for grayscale images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelAddress {
    pub row: u32,
    pub column: u32,
    pub channel: Option<Channel>,
}

/// Rectangular grid of 8 bit samples stored row by row.
///
/// Color images keep the three channels of a pixel next to each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    mode: ColorMode,
    samples: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, mode: ColorMode, samples: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * mode.channels_per_pixel();
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Image {
            width,
            height,
            mode,
            samples,
        })
    }

    pub fn grayscale(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ColorMode::Grayscale, samples)
    }

    pub fn rgb(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ColorMode::Rgb, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn is_grayscale(&self) -> bool {
        self.mode == ColorMode::Grayscale
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    fn index(&self, address: &PixelAddress) -> Option<usize> {
        if address.row >= self.height || address.column >= self.width {
            return None;
        }
        let pixel_index = address.row as usize * self.width as usize + address.column as usize;
        let channel_offset = match (self.mode, address.channel) {
            (ColorMode::Grayscale, None) => 0,
            (ColorMode::Rgb, Some(channel)) => channel.offset(),
            _ => return None,
        };
        Some(pixel_index * self.mode.channels_per_pixel() + channel_offset)
    }

    pub fn sample(&self, address: &PixelAddress) -> Option<u8> {
        self.index(address).map(|index| self.samples[index])
    }

    /// Returns false when the address does not belong to this image.
    pub fn set_sample(&mut self, address: &PixelAddress, value: u8) -> bool {
        match self.index(address) {
            Some(index) => {
                self.samples[index] = value;
                true
            }
            None => false,
        }
    }

    /// Euclidean norm of the sample-wise difference between two images of equal shape
    pub fn distance(&self, other: &Image) -> f64 {
        self.samples
            .iter()
            .zip(other.samples.iter())
            .map(|(&a, &b)| {
                let difference = a as f64 - b as f64;
                difference * difference
            })
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod test {
    use super::{Channel, ColorMode, Image, PixelAddress};
    use crate::error::Error;

    #[rustfmt::skip]
    const TEST_RGB_SAMPLES: &[u8] = &[
        1, 2, 3,    4, 5, 6,
        7, 8, 9,   10, 11, 12,
    ];

    fn address(row: u32, column: u32, channel: Option<Channel>) -> PixelAddress {
        PixelAddress {
            row,
            column,
            channel,
        }
    }

    #[test]
    fn reject_wrong_sample_count() {
        let result = Image::rgb(2, 2, vec![0; 11]);
        assert!(matches!(
            result,
            Err(Error::SampleCountMismatch {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn address_rgb_samples() {
        let image = Image::rgb(2, 2, Vec::from(TEST_RGB_SAMPLES)).unwrap();
        assert_eq!(image.sample(&address(0, 1, Some(Channel::Red))), Some(4));
        assert_eq!(image.sample(&address(1, 0, Some(Channel::Blue))), Some(9));
        assert_eq!(image.sample(&address(1, 1, Some(Channel::Green))), Some(11));
    }

    #[test]
    fn address_grayscale_samples() {
        let image = Image::grayscale(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(image.mode(), ColorMode::Grayscale);
        assert_eq!(image.sample(&address(1, 0, None)), Some(30));
    }

    #[test]
    fn reject_foreign_addresses() {
        let mut image = Image::grayscale(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(image.sample(&address(0, 0, Some(Channel::Red))), None);
        assert_eq!(image.sample(&address(2, 0, None)), None);
        assert!(!image.set_sample(&address(0, 2, None), 1));
        assert_eq!(image.samples(), &[10, 20, 30, 40]);
    }

    #[test]
    fn set_sample_changes_only_target() {
        let mut image = Image::rgb(2, 2, Vec::from(TEST_RGB_SAMPLES)).unwrap();
        assert!(image.set_sample(&address(1, 1, Some(Channel::Red)), 99));
        assert_eq!(image.samples(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 99, 11, 12]);
    }

    #[test]
    fn distance_between_images() {
        let a = Image::grayscale(2, 1, vec![0, 0]).unwrap();
        let b = Image::grayscale(2, 1, vec![3, 4]).unwrap();
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }
}
