use image::{DynamicImage, ImageError, RgbImage, RgbaImage};
use lib_qoi::{decode_with, encode, Channels, ColorSpace, DecodeOptions, Image};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageHandlingError {
    #[error("File {0} does not exist")]
    NotFound(PathBuf),

    #[error("Invalid file path")]
    InvalidPath,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("QOI decode error: {0}")]
    DecodeError(#[from] lib_qoi::DecodeError),

    #[error("Invalid pixel buffer: {0}")]
    InvalidImage(#[from] lib_qoi::ImageError),

    #[error("Image dimensions do not fit the output buffer")]
    BufferSize,
}

/// Loads a PNG/JPEG/BMP/WebP file as a QOI image buffer.
///
/// Sources with an alpha channel become 4-channel images, all others 3.
pub fn open_standard_image(path: &Path) -> Result<Image, ImageHandlingError> {
    if !path.is_file() {
        return Err(ImageHandlingError::NotFound(path.to_path_buf()));
    }

    let source = image::open(path)?;
    let (width, height) = (source.width(), source.height());
    let image = if source.color().has_alpha() {
        Image::from_raw(width, height, 4, ColorSpace::Srgb, source.to_rgba8().as_raw())?
    } else {
        Image::from_raw(width, height, 3, ColorSpace::Srgb, source.to_rgb8().as_raw())?
    };
    info!(
        "Loaded {} ({}x{}, {} channels)",
        path.display(),
        width,
        height,
        image.channels().count()
    );
    Ok(image)
}

/// Encodes `source` into `<output_dir>/<stem>.qoi`, creating the directory.
pub fn encode_file(source: &Path, output_dir: &Path) -> Result<PathBuf, ImageHandlingError> {
    let image = open_standard_image(source)?;

    let stem = source.file_stem().ok_or(ImageHandlingError::InvalidPath)?;
    fs::create_dir_all(output_dir)?;
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(lib_qoi::constants::FILE_EXT);
    let target = output_dir.join(file_name);

    let encoded_data = encode(&image);
    File::create(&target)?.write_all(&encoded_data)?;
    info!(
        "File saved successfully to {} ({} bytes)",
        target.display(),
        encoded_data.len()
    );

    Ok(target)
}

pub fn read_qoi(path: &Path) -> Result<Vec<u8>, ImageHandlingError> {
    if !path.is_file() {
        return Err(ImageHandlingError::NotFound(path.to_path_buf()));
    }
    let mut buffer = Vec::new();
    File::open(path)?.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Decodes a `.qoi` file and saves it in the format implied by `target`'s extension.
pub fn decode_file(
    source: &Path,
    target: &Path,
    options: &DecodeOptions,
) -> Result<(), ImageHandlingError> {
    let buffer = read_qoi(source)?;
    let decoded = decode_with(&buffer, options)?;
    for warning in &decoded.warnings {
        warn!("{}: {}", source.display(), warning);
    }

    to_dynamic(&decoded.image)?.save(target)?;
    info!("File saved successfully to {}", target.display());
    Ok(())
}

fn to_dynamic(image: &Image) -> Result<DynamicImage, ImageHandlingError> {
    let (width, height) = (image.width(), image.height());
    let raw = image.to_raw();
    let dynamic = match image.channels() {
        Channels::Rgb => DynamicImage::ImageRgb8(
            RgbImage::from_raw(width, height, raw).ok_or(ImageHandlingError::BufferSize)?,
        ),
        Channels::Rgba => DynamicImage::ImageRgba8(
            RgbaImage::from_raw(width, height, raw).ok_or(ImageHandlingError::BufferSize)?,
        ),
    };
    Ok(dynamic)
}
