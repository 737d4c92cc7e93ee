use std::io::{Seek, Write};

use ::image::{DynamicImage, GrayImage, ImageError, ImageFormat, RgbImage};

use super::{ColorMode, Image, ImageWriter};
use crate::{error::Error, Result};

/// Writes a sample grid in a lossless raster format
pub struct RasterImageWriter<W: Write + Seek> {
    writer: W,
    name: String,
    format: ImageFormat,
}

impl<W: Write + Seek> RasterImageWriter<W> {
    pub fn new(writer: W, name: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            writer,
            name: name.into(),
            format,
        }
    }

    fn to_raster(image: &Image) -> Option<DynamicImage> {
        let (width, height) = (image.width(), image.height());
        let samples = image.samples().to_vec();
        match image.mode() {
            ColorMode::Grayscale => {
                GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
            }
            ColorMode::Rgb => {
                RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8)
            }
        }
    }
}

impl<W: Write + Seek> ImageWriter for RasterImageWriter<W> {
    fn write_image(&mut self, image: &Image) -> Result<()> {
        let raster = Self::to_raster(image).ok_or(Error::SampleCountMismatch {
            expected: image.pixel_count() * image.mode().channels_per_pixel(),
            actual: image.samples().len(),
        })?;
        raster
            .write_to(&mut self.writer, self.format)
            .map_err(|e| Error::UnableToEncodeImage(self.name.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| Error::UnableToEncodeImage(self.name.clone(), ImageError::IoError(e)))
    }
}
