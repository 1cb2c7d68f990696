use std::{io, path::Path};

use image::{DynamicImage, GenericImageView, ImageError, RgbaImage};

use crate::Error;

pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// A decoded raster addressed by integer coordinates in
/// `[0, width) x [0, height)`.
pub trait ImageSource {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Pixel at `(x, y)`. Only called with coordinates inside
    /// [`size`](Self::size); implementations may panic otherwise.
    fn raw_pixel(&self, x: u32, y: u32) -> Rgba;

    fn pixel(&self, x: u32, y: u32) -> Result<Rgba, Error> {
        let (width, height) = self.size();
        if x >= width || y >= height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        Ok(self.raw_pixel(x, y))
    }
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn raw_pixel(&self, x: u32, y: u32) -> Rgba {
        (**self).raw_pixel(x, y)
    }
}

impl ImageSource for RgbaImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn raw_pixel(&self, x: u32, y: u32) -> Rgba {
        self.get_pixel(x, y).0
    }
}

impl ImageSource for DynamicImage {
    fn size(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn raw_pixel(&self, x: u32, y: u32) -> Rgba {
        GenericImageView::get_pixel(self, x, y).0
    }
}

/// Widens a source with fully transparent columns on either side.
#[derive(Debug, Clone, Copy)]
pub struct Padded<S> {
    inner: S,
    left: u32,
    right: u32,
}

impl<S: ImageSource> Padded<S> {
    pub fn new(inner: S, left: u32, right: u32) -> Self {
        Self { inner, left, right }
    }
}

impl<S: ImageSource> ImageSource for Padded<S> {
    fn size(&self) -> (u32, u32) {
        let (width, height) = self.inner.size();
        (width + self.left + self.right, height)
    }

    fn raw_pixel(&self, x: u32, y: u32) -> Rgba {
        let (width, _) = self.inner.size();
        match x.checked_sub(self.left) {
            Some(x) if x < width => self.inner.raw_pixel(x, y),
            _ => TRANSPARENT,
        }
    }
}

/// Decodes the image at `path` into 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, Error> {
    let image = image::open(path).map_err(|source| match source {
        ImageError::IoError(err) if err.kind() == io::ErrorKind::NotFound => {
            Error::AssetNotFound {
                path: path.to_path_buf(),
            }
        }
        source => Error::Decode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(image.into_rgba8())
}
