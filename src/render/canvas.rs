//! Fixed-size RGB canvas that plotters draws into

use crate::error::PipelineError;
use crate::model::RenderedImage;
use image::{ImageFormat, Rgb, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;

/// Largest accepted width or height in pixels
pub const MAX_DIMENSION: u32 = 16384;

/// Raster canvas backed by an `image::RgbImage`
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::Encoding(format!(
                "canvas dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(PipelineError::Encoding(format!(
                "canvas {}x{} exceeds the {} px limit",
                width, height, MAX_DIMENSION
            )));
        }

        Ok(Self {
            image: RgbImage::from_pixel(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Whole-canvas drawing area writing straight into the pixel buffer
    pub fn drawing_area(&mut self) -> DrawingArea<BitMapBackend<'_>, Shift> {
        let size = (self.image.width(), self.image.height());
        let buffer: &mut [u8] = &mut self.image;
        BitMapBackend::with_buffer(buffer, size).into_drawing_area()
    }

    /// Encode the canvas losslessly as PNG
    pub fn encode_png(&self) -> Result<RenderedImage, PipelineError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| PipelineError::Encoding(e.to_string()))?;
        Ok(RenderedImage::png(buffer.into_inner()))
    }
}

/// Convert an `image` color for use with plotters
pub(crate) fn plot_color(color: Rgb<u8>) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}
