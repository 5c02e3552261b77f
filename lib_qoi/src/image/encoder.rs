use log::{debug, info};
use thiserror::Error;

use super::format::{ColorSpace, Header, Image, ImageError};
use crate::codec::encode_chunks;
use crate::constants::{END_MARKER, HEADER_SIZE};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),
}

/// Worst-case encoded size: every pixel as a full RGB/RGBA chunk.
pub fn max_encoded_len(image: &Image) -> usize {
    let per_pixel = image.channels().count() + 1;
    image.pixels().len() * per_pixel + HEADER_SIZE + END_MARKER.len()
}

pub fn encode(image: &Image) -> Vec<u8> {
    info!("Starting encoding");

    let mut encoded_data: Vec<u8> = Vec::with_capacity(max_encoded_len(image));

    // Step 1: Write header
    let header = Header::for_image(image);
    encoded_data.extend_from_slice(&header.to_bytes());
    debug!(
        "Header written:\nWidth: {}\nHeight: {}\nChannels: {}\nColorspace: {}",
        header.width, header.height, header.channels, header.colorspace
    );

    // Step 2: Chunk stream
    let stats = encode_chunks(image.pixels(), &mut encoded_data);
    debug!("Chunk stream written with {} chunks", stats.total());

    // Step 3: End marker
    encoded_data.extend_from_slice(&END_MARKER);

    info!(
        "Encoding completed successfully: {} bytes ({:.1}% of raw)",
        encoded_data.len(),
        encoded_data.len() as f64 * 100.0
            / (image.pixels().len() * image.channels().count()) as f64
    );
    encoded_data
}

/// Encodes interleaved pixel bytes, `channels` bytes per pixel.
pub fn encode_raw(
    width: u32,
    height: u32,
    channels: u8,
    colorspace: ColorSpace,
    data: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let image = Image::from_raw(width, height, channels, colorspace, data)?;
    Ok(encode(&image))
}
