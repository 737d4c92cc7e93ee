use std::io::{BufRead, Seek};

use ::image::{io::Reader, DynamicImage};

use super::{Image, ImageReader};
use crate::{error::Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadMode {
    /// single channel rasters become grayscale, everything else RGB
    Detect,
    /// convert every raster to 8 bit luma
    Grayscale,
}

/// Reads any raster format known to the `image` crate into an 8 bit sample grid
pub struct RasterImageReader<R: BufRead + Seek> {
    reader: R,
    name: String,
    mode: LoadMode,
}

impl<R: BufRead + Seek> RasterImageReader<R> {
    pub fn new(reader: R, name: impl Into<String>, mode: LoadMode) -> Self {
        Self {
            reader,
            name: name.into(),
            mode,
        }
    }

    fn decode(&mut self) -> Result<DynamicImage> {
        let reader = Reader::new(&mut self.reader)
            .with_guessed_format()
            .map_err(|e| Error::UnableToOpenInputFileForReading(self.name.clone(), e))?;
        reader
            .decode()
            .map_err(|e| Error::UnableToDecodeImage(self.name.clone(), e))
    }

    fn convert(&self, raster: DynamicImage) -> Result<Image> {
        let color_type = raster.color();
        if color_type.has_alpha() {
            log::warn!(
                "'{}' has an alpha channel, it is dropped from the output",
                self.name
            );
        }
        if self.mode == LoadMode::Grayscale || !color_type.has_color() {
            log::info!("'{}' is handled as grayscale", self.name);
            let buffer = raster.to_luma8();
            Image::grayscale(buffer.width(), buffer.height(), buffer.into_raw())
        } else {
            let buffer = raster.to_rgb8();
            Image::rgb(buffer.width(), buffer.height(), buffer.into_raw())
        }
    }
}

impl<R: BufRead + Seek> ImageReader for RasterImageReader<R> {
    fn read_image(&mut self) -> Result<Image> {
        let raster = self.decode()?;
        self.convert(raster)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use ::image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

    use super::{LoadMode, RasterImageReader};
    use crate::{
        error::Error,
        image::{ColorMode, ImageReader},
    };

    fn png_bytes(raster: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        raster
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encoding PNG into memory should not fail");
        bytes
    }

    #[test]
    fn read_rgb_png() {
        let raster = RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let bytes = png_bytes(DynamicImage::ImageRgb8(raster));
        let mut reader = RasterImageReader::new(Cursor::new(bytes), "memory", LoadMode::Detect);
        let image = reader.read_image().expect("PNG should be readable");
        assert_eq!(image.mode(), ColorMode::Rgb);
        assert_eq!(image.samples(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn detect_grayscale_png() {
        let raster = GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap();
        let bytes = png_bytes(DynamicImage::ImageLuma8(raster));
        let mut reader = RasterImageReader::new(Cursor::new(bytes), "memory", LoadMode::Detect);
        let image = reader.read_image().expect("PNG should be readable");
        assert!(image.is_grayscale());
        assert_eq!(image.samples(), &[10, 20, 30, 40]);
    }

    #[test]
    fn force_grayscale_conversion() {
        let raster = RgbImage::from_raw(1, 1, vec![200, 200, 200]).unwrap();
        let bytes = png_bytes(DynamicImage::ImageRgb8(raster));
        let mut reader =
            RasterImageReader::new(Cursor::new(bytes), "memory", LoadMode::Grayscale);
        let image = reader.read_image().expect("PNG should be readable");
        assert!(image.is_grayscale());
        assert_eq!(image.samples(), &[200]);
    }

    #[test]
    fn alpha_is_dropped() {
        let raster = RgbaImage::from_raw(1, 1, vec![9, 8, 7, 128]).unwrap();
        let bytes = png_bytes(DynamicImage::ImageRgba8(raster));
        let mut reader = RasterImageReader::new(Cursor::new(bytes), "memory", LoadMode::Detect);
        let image = reader.read_image().expect("PNG should be readable");
        assert_eq!(image.samples(), &[9, 8, 7]);
    }

    #[test]
    fn reject_garbage() {
        let bytes = b"definitely not an image".to_vec();
        let mut reader = RasterImageReader::new(Cursor::new(bytes), "garbage", LoadMode::Detect);
        match reader.read_image() {
            Err(Error::UnableToDecodeImage(name, _)) => assert_eq!(name, "garbage"),
            other => panic!("expected UnableToDecodeImage, got {:?}", other),
        }
    }
}
