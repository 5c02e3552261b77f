use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HEADER_SIZE, MAGIC_HEADER};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid channel count {0}: expected 3 (RGB) or 4 (RGBA)")]
    InvalidChannelCount(u8),
    #[error("Invalid colorspace {0}: expected 0 (sRGB, linear alpha) or 1 (all linear)")]
    InvalidColorSpace(u8),
    #[error("Pixel count mismatch: expected {expected} values, got {actual}")]
    PixelCountMismatch { expected: u64, actual: u64 },
}

/// A single RGBA pixel with 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel([u8; 4]);

impl Pixel {
    pub const ZERO: Pixel = Pixel([0, 0, 0, 0]);
    /// The implicit pixel preceding the first one of every image.
    pub const OPAQUE_BLACK: Pixel = Pixel([0, 0, 0, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn r(&self) -> u8 {
        self.0[0]
    }

    pub const fn g(&self) -> u8 {
        self.0[1]
    }

    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    pub const fn a(&self) -> u8 {
        self.0[3]
    }

    pub const fn to_array(self) -> [u8; 4] {
        self.0
    }

    /// Same color with the given alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], a])
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    pub const fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channels {
    type Error = ImageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(ImageError::InvalidChannelCount(other)),
        }
    }
}

/// Colorspace tag. Carried through encode/decode untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    Srgb = 0,
    Linear = 1,
}

impl TryFrom<u8> for ColorSpace {
    type Error = ImageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorSpace::Srgb),
            1 => Ok(ColorSpace::Linear),
            other => Err(ImageError::InvalidColorSpace(other)),
        }
    }
}

/// The fixed 14-byte stream header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub magic: [u8; 4],
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: u8,
}

impl Header {
    pub const MAGIC_SIZE: usize = 4;

    pub fn for_image(image: &Image) -> Self {
        Self {
            magic: MAGIC_HEADER,
            width: image.width,
            height: image.height,
            channels: image.channels as u8,
            colorspace: image.colorspace as u8,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.width.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.height.to_be_bytes());
        bytes[12] = self.channels;
        bytes[13] = self.colorspace;
        bytes
    }

    /// Reads the header fields without validating them. Returns `None` when
    /// fewer than 14 bytes are available.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; HEADER_SIZE] = bytes.get(..HEADER_SIZE)?.try_into().ok()?;
        let [m0, m1, m2, m3, w0, w1, w2, w3, h0, h1, h2, h3, channels, colorspace] = *bytes;
        Some(Self {
            magic: [m0, m1, m2, m3],
            width: u32::from_be_bytes([w0, w1, w2, w3]),
            height: u32::from_be_bytes([h0, h1, h2, h3]),
            channels,
            colorspace,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Decoded pixel data. Always holds exactly `width * height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    colorspace: ColorSpace,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Builds an image, checking dimensions and pixel count.
    ///
    /// For [`Channels::Rgb`] images the alpha of every pixel is forced to 255.
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        colorspace: ColorSpace,
        pixels: Vec<Pixel>,
    ) -> Result<Self, ImageError> {
        let channels = Self::validate(width, height, channels)?;
        let expected = width as u64 * height as u64;
        if pixels.len() as u64 != expected {
            return Err(ImageError::PixelCountMismatch {
                expected,
                actual: pixels.len() as u64,
            });
        }

        let pixels = match channels {
            Channels::Rgba => pixels,
            Channels::Rgb => pixels.into_iter().map(|p| p.with_alpha(255)).collect(),
        };

        Ok(Self {
            width,
            height,
            channels,
            colorspace,
            pixels,
        })
    }

    /// Builds an image from interleaved bytes, `channels` bytes per pixel.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        colorspace: ColorSpace,
        data: &[u8],
    ) -> Result<Self, ImageError> {
        let channel_kind = Self::validate(width, height, channels)?;
        let expected = width as u64 * height as u64 * channel_kind.count() as u64;
        if data.len() as u64 != expected {
            return Err(ImageError::PixelCountMismatch {
                expected,
                actual: data.len() as u64,
            });
        }

        let pixels = match channel_kind {
            Channels::Rgb => data
                .chunks_exact(3)
                .map(|c| Pixel::from([c[0], c[1], c[2]]))
                .collect(),
            Channels::Rgba => data
                .chunks_exact(4)
                .map(|c| Pixel::from([c[0], c[1], c[2], c[3]]))
                .collect(),
        };

        Ok(Self {
            width,
            height,
            channels: channel_kind,
            colorspace,
            pixels,
        })
    }

    pub(crate) fn validate(width: u32, height: u32, channels: u8) -> Result<Channels, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        Channels::try_from(channels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Interleaved bytes, 3 or 4 per pixel depending on the channel count.
    pub fn to_raw(&self) -> Vec<u8> {
        let stride = self.channels.count();
        let mut raw = Vec::with_capacity(self.pixels.len() * stride);
        for pixel in &self.pixels {
            raw.extend_from_slice(&pixel.to_array()[..stride]);
        }
        raw
    }
}
