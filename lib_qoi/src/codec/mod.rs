pub mod chunk;
pub mod history;

use log::{debug, info};
use thiserror::Error;

use crate::constants::MAX_RUN;
use crate::image::format::Pixel;
use chunk::Chunk;
use history::PixelHistory;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkError {
    #[error(
        "Unexpected end of stream at chunk offset {offset}: decoded {decoded} of {expected} pixels"
    )]
    UnexpectedEndOfStream {
        offset: usize,
        decoded: usize,
        expected: usize,
    },
}

/// How many chunks of each kind a pass produced or consumed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChunkStats {
    pub run: usize,
    pub index: usize,
    pub diff: usize,
    pub luma: usize,
    pub rgb: usize,
    pub rgba: usize,
}

impl ChunkStats {
    fn record(&mut self, chunk: &Chunk) {
        match chunk {
            Chunk::Run(_) => self.run += 1,
            Chunk::Index(_) => self.index += 1,
            Chunk::Diff { .. } => self.diff += 1,
            Chunk::Luma { .. } => self.luma += 1,
            Chunk::Rgb { .. } => self.rgb += 1,
            Chunk::Rgba(_) => self.rgba += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.run + self.index + self.diff + self.luma + self.rgb + self.rgba
    }
}

fn emit(chunk: Chunk, out: &mut Vec<u8>, stats: &mut ChunkStats) {
    chunk.write(out);
    stats.record(&chunk);
}

/// Encodes `pixels` as a chunk stream appended to `out`.
pub fn encode_chunks(pixels: &[Pixel], out: &mut Vec<u8>) -> ChunkStats {
    info!("Starting chunk encoding of {} pixels", pixels.len());
    let start_len = out.len();

    let mut history = PixelHistory::new();
    let mut previous = Pixel::OPAQUE_BLACK;
    let mut run_length = 0u8;
    let mut stats = ChunkStats::default();
    let last = pixels.len().saturating_sub(1);

    for (position, &pixel) in pixels.iter().enumerate() {
        if pixel == previous {
            run_length += 1;
            if run_length == MAX_RUN || position == last {
                emit(Chunk::Run(run_length), out, &mut stats);
                run_length = 0;
            }
            continue;
        }

        if run_length > 0 {
            emit(Chunk::Run(run_length), out, &mut stats);
            run_length = 0;
        }

        let chunk = if history.matches(pixel) {
            Chunk::select(previous, pixel, Some(PixelHistory::lookup(pixel)))
        } else {
            history.store(pixel);
            Chunk::select(previous, pixel, None)
        };
        emit(chunk, out, &mut stats);

        previous = pixel;
    }

    debug!("Chunk stats: {:?}", stats);
    info!(
        "Chunk encoding completed: {} chunks, {} bytes",
        stats.total(),
        out.len() - start_len
    );
    stats
}

/// Decodes exactly `count` pixels from the chunk stream at the start of `data`.
///
/// Returns the pixels and the number of bytes consumed. Bytes past the last
/// needed chunk are left untouched.
pub fn decode_chunks(data: &[u8], count: usize) -> Result<(Vec<Pixel>, usize), ChunkError> {
    info!("Starting chunk decoding of {} pixels", count);

    let mut history = PixelHistory::new();
    let mut previous = Pixel::OPAQUE_BLACK;
    let mut pixels = Vec::with_capacity(count);
    let mut stats = ChunkStats::default();
    let mut offset = 0;

    while pixels.len() < count {
        let (chunk, len) =
            Chunk::read(&data[offset..]).ok_or(ChunkError::UnexpectedEndOfStream {
                offset,
                decoded: pixels.len(),
                expected: count,
            })?;
        offset += len;
        stats.record(&chunk);

        let pixel = chunk.reconstruct(previous, &history);
        match chunk {
            Chunk::Run(length) => {
                let remaining = count - pixels.len();
                let length = (length as usize).min(remaining);
                pixels.extend(std::iter::repeat(pixel).take(length));
            }
            Chunk::Index(_) => pixels.push(pixel),
            _ => {
                history.store(pixel);
                pixels.push(pixel);
            }
        }
        previous = pixel;
    }

    debug!("Chunk stats: {:?}", stats);
    info!("Chunk decoding completed: {} bytes consumed", offset);
    Ok((pixels, offset))
}
