pub const FORMAT_NAME: &str = "Quite OK Image";
pub const FILE_EXT: &str = "qoi";

pub const MAGIC_HEADER: [u8; 4] = *b"qoif";
pub const HEADER_SIZE: usize = 14;
pub const END_MARKER: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];

/// Largest pixel count accepted by the decoder unless configured otherwise.
pub const DEFAULT_MAX_PIXELS: u64 = 400_000_000;

// Chunk tags. The two full-byte tags are matched before the 2-bit ones.
pub const TAG_RGB: u8 = 0b1111_1110;
pub const TAG_RGBA: u8 = 0b1111_1111;
pub const TAG_INDEX: u8 = 0b0000_0000;
pub const TAG_DIFF: u8 = 0b0100_0000;
pub const TAG_LUMA: u8 = 0b1000_0000;
pub const TAG_RUN: u8 = 0b1100_0000;
pub const TAG_MASK: u8 = 0b1100_0000;
pub const PAYLOAD_MASK: u8 = 0b0011_1111;

pub const HISTORY_SIZE: usize = 64;
pub const MAX_RUN: u8 = 62;
