use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::format::{ColorSpace, Header, Image, ImageError};
use crate::codec::{decode_chunks, ChunkError};
use crate::constants::{DEFAULT_MAX_PIXELS, END_MARKER, HEADER_SIZE, MAGIC_HEADER};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Bad magic bytes {0:?}: not a QOI stream")]
    BadMagic([u8; 4]),
    #[error("Truncated header: expected 14 bytes, got {0}")]
    TruncatedHeader(usize),
    #[error("Image of {pixels} pixels exceeds the limit of {limit}")]
    ImageTooLarge { pixels: u64, limit: u64 },
    #[error("Invalid image header")]
    InvalidImage(#[from] ImageError),
    #[error("Chunk decoding failed")]
    Chunks(#[from] ChunkError),
}

/// Problems that do not stop the image from being returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
    #[error("End marker missing or corrupt at byte {offset}")]
    MissingEndMarker { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Check the end marker after the last chunk and report a warning if it
    /// is not there.
    pub strict: bool,
    /// Headers declaring more pixels than this are rejected up front.
    pub max_pixels: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

#[derive(Debug)]
pub struct Decoded {
    pub image: Image,
    pub warnings: Vec<DecodeWarning>,
}

/// Reads the header at the start of `encoded_data`, checking the magic bytes.
pub fn read_header(encoded_data: &[u8]) -> Result<Header, DecodeError> {
    if let Some(&[m0, m1, m2, m3]) = encoded_data.get(..Header::MAGIC_SIZE) {
        let magic = [m0, m1, m2, m3];
        if magic != MAGIC_HEADER {
            error!("Invalid magic number in header: {:?}", magic);
            return Err(DecodeError::BadMagic(magic));
        }
    }

    Header::read(encoded_data).ok_or_else(|| {
        error!("Header truncated at {} bytes", encoded_data.len());
        DecodeError::TruncatedHeader(encoded_data.len())
    })
}

pub fn decode(encoded_data: &[u8]) -> Result<Image, DecodeError> {
    decode_with(encoded_data, &DecodeOptions::default()).map(|decoded| decoded.image)
}

pub fn decode_with(encoded_data: &[u8], options: &DecodeOptions) -> Result<Decoded, DecodeError> {
    info!("Starting decoding of {} bytes", encoded_data.len());

    // Step 1: Header
    let header = read_header(encoded_data)?;
    debug!(
        "Header read: width={} height={} channels={} colorspace={}",
        header.width, header.height, header.channels, header.colorspace
    );

    let colorspace = Image::validate(header.width, header.height, header.channels)
        .and_then(|_| ColorSpace::try_from(header.colorspace))
        .map_err(|e| {
            error!("{}", e);
            e
        })?;

    let pixel_count = header.pixel_count();
    if pixel_count > options.max_pixels {
        error!(
            "Image of {} pixels exceeds the limit of {}",
            pixel_count, options.max_pixels
        );
        return Err(DecodeError::ImageTooLarge {
            pixels: pixel_count,
            limit: options.max_pixels,
        });
    }

    // Step 2: Chunk stream
    let chunk_data = &encoded_data[HEADER_SIZE..];
    let (pixels, consumed) = decode_chunks(chunk_data, pixel_count as usize).map_err(|e| {
        error!("{}", e);
        e
    })?;

    // Step 3: End marker
    let mut warnings = Vec::new();
    if options.strict {
        let offset = HEADER_SIZE + consumed;
        if !encoded_data[offset..].starts_with(&END_MARKER) {
            let warning = DecodeWarning::MissingEndMarker { offset };
            warn!("{}", warning);
            warnings.push(warning);
        }
    }

    let image = Image::new(
        header.width,
        header.height,
        header.channels,
        colorspace,
        pixels,
    )?;
    info!("Decoding completed successfully");

    Ok(Decoded { image, warnings })
}
