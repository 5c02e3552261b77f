pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, decode_with, DecodeError, DecodeOptions, DecodeWarning, Decoded};
pub use encoder::{encode, encode_raw, max_encoded_len, EncodingError};
