mod common;

use common::palette_noise;
use lib_qoi::codec::{decode_chunks, encode_chunks};
use lib_qoi::{Chunk, Pixel, PixelHistory};

/// Replays an encoded stream, checking after every chunk that each history
/// slot holds the latest pixel stored through it.
fn check_history(pixels: &[Pixel]) {
    let mut encoded = Vec::new();
    encode_chunks(pixels, &mut encoded);

    let mut history = PixelHistory::new();
    let mut latest = [Pixel::ZERO; 64];
    let mut previous = Pixel::OPAQUE_BLACK;
    let mut offset = 0;
    let mut produced = 0;

    while produced < pixels.len() {
        let (chunk, len) = Chunk::read(&encoded[offset..]).unwrap();
        assert!(chunk.is_valid(), "encoder wrote {:?}", chunk);
        offset += len;

        match chunk {
            Chunk::Run(length) => {
                for pixel in &pixels[produced..produced + length as usize] {
                    assert_eq!(*pixel, previous);
                }
                produced += length as usize;
            }
            Chunk::Index(slot) => {
                assert_eq!(pixels[produced], latest[slot as usize]);
                previous = pixels[produced];
                produced += 1;
            }
            other => {
                let pixel = other.reconstruct(previous, &history);
                assert_eq!(pixel, pixels[produced]);
                history.store(pixel);
                latest[PixelHistory::lookup(pixel) as usize] = pixel;
                previous = pixel;
                produced += 1;
            }
        }

        for slot in 0..64u8 {
            assert_eq!(history.get(slot), latest[slot as usize]);
        }
    }

    assert_eq!(produced, pixels.len());
    assert_eq!(offset, encoded.len());
}

#[test]
fn test_history_consistency_palette() {
    check_history(&palette_noise(5000, 11));
}

#[test]
fn test_history_consistency_opaque_start() {
    let mut pixels = vec![Pixel::OPAQUE_BLACK; 70];
    pixels.extend(palette_noise(500, 12));
    check_history(&pixels);
}

#[test]
fn test_chunk_stream_round_trip() {
    let pixels = palette_noise(4096, 13);
    let mut encoded = Vec::new();
    let stats = encode_chunks(&pixels, &mut encoded);
    assert!(stats.index > 0);
    assert!(stats.run > 0);
    assert!(stats.rgba > 0);

    let (decoded, consumed) = decode_chunks(&encoded, pixels.len()).unwrap();
    assert_eq!(decoded, pixels);
    assert_eq!(consumed, encoded.len());
}

#[test]
fn test_decoder_accepts_any_tag_byte() {
    // Every byte value is a valid chunk tag; only running out of data fails.
    for tag in 0..=255u8 {
        let data = [tag, 0, 0, 0, 0];
        let result = decode_chunks(&data, 1);
        assert!(result.is_ok(), "tag {:#04x} rejected", tag);
    }
}

#[test]
fn test_non_conforming_long_run_decodes() {
    // A run payload of 61 decodes as 62 pixels, the longest a run byte can express.
    let (decoded, consumed) = decode_chunks(&[0xfd], 62).unwrap();
    assert_eq!(decoded, vec![Pixel::OPAQUE_BLACK; 62]);
    assert_eq!(consumed, 1);
}
