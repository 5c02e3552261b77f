pub mod codec;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::codec::chunk::Chunk;
pub use crate::codec::history::PixelHistory;
pub use crate::image::format::{Channels, ColorSpace, Header, Image, ImageError, Pixel};
pub use crate::image::{
    decode, decode_with, encode, encode_raw, DecodeError, DecodeOptions, DecodeWarning, Decoded,
    EncodingError,
};

/// Logs `lib_qoi` and the calling binary's records at `level` to stderr.
pub fn init_logging(level: LevelFilter, binary: &str) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_qoi"), level)
        .filter(Some(binary), level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
