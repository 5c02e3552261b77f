use super::history::PixelHistory;
use crate::constants::{
    HISTORY_SIZE, MAX_RUN, PAYLOAD_MASK, TAG_DIFF, TAG_INDEX, TAG_LUMA, TAG_MASK, TAG_RGB,
    TAG_RGBA, TAG_RUN,
};
use crate::image::format::Pixel;

/// One encoded unit of the pixel stream.
///
/// Deltas are held unbiased; the +2/+32/+8 biases and the -1 run bias are
/// applied only when writing and removed by [`Chunk::read`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chunk {
    /// Repeat the previous pixel this many times (1..=62).
    Run(u8),
    /// Pixel stored in the given history slot.
    Index(u8),
    /// Small per-channel change, each delta in -2..=1.
    Diff { dr: i8, dg: i8, db: i8 },
    /// Green delta in -32..=31, red and blue relative to it in -8..=7.
    Luma { dg: i8, dr_dg: i8, db_dg: i8 },
    /// Raw color, alpha taken from the previous pixel.
    Rgb { r: u8, g: u8, b: u8 },
    Rgba(Pixel),
}

/// Difference between two channel values, taken mod 256 and read as signed.
#[inline]
pub fn channel_delta(current: u8, previous: u8) -> i8 {
    current.wrapping_sub(previous) as i8
}

#[inline]
fn apply_delta(previous: u8, delta: i8) -> u8 {
    previous.wrapping_add(delta as u8)
}

impl Chunk {
    /// Picks the cheapest non-run chunk for `pixel`.
    ///
    /// `index_hit` is the history slot already holding `pixel`, if any. The
    /// caller owns the history table and stores `pixel` when there is no hit.
    pub fn select(previous: Pixel, pixel: Pixel, index_hit: Option<u8>) -> Chunk {
        if let Some(slot) = index_hit {
            return Chunk::Index(slot);
        }

        if pixel.a() != previous.a() {
            return Chunk::Rgba(pixel);
        }

        let dr = channel_delta(pixel.r(), previous.r());
        let dg = channel_delta(pixel.g(), previous.g());
        let db = channel_delta(pixel.b(), previous.b());

        let small = -2..=1;
        if small.contains(&dr) && small.contains(&dg) && small.contains(&db) {
            return Chunk::Diff { dr, dg, db };
        }

        // Widened: dr - dg can reach 159, past the i8 range.
        let dr_dg = dr as i16 - dg as i16;
        let db_dg = db as i16 - dg as i16;
        if (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg) {
            return Chunk::Luma {
                dg,
                dr_dg: dr_dg as i8,
                db_dg: db_dg as i8,
            };
        }

        Chunk::Rgb {
            r: pixel.r(),
            g: pixel.g(),
            b: pixel.b(),
        }
    }

    /// Encoded size in bytes, tag included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Chunk::Run(_) | Chunk::Index(_) | Chunk::Diff { .. } => 1,
            Chunk::Luma { .. } => 2,
            Chunk::Rgb { .. } => 4,
            Chunk::Rgba(_) => 5,
        }
    }

    /// Whether every field fits its bit field without colliding with another tag.
    pub fn is_valid(&self) -> bool {
        match *self {
            Chunk::Run(length) => (1..=MAX_RUN).contains(&length),
            Chunk::Index(slot) => (slot as usize) < HISTORY_SIZE,
            Chunk::Diff { dr, dg, db } => [dr, dg, db].iter().all(|d| (-2..=1).contains(d)),
            Chunk::Luma { dg, dr_dg, db_dg } => {
                (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg)
            }
            Chunk::Rgb { .. } | Chunk::Rgba(_) => true,
        }
    }

    /// Only fed chunks from [`Chunk::select`] or bounded runs; see [`Chunk::is_valid`].
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        debug_assert!(self.is_valid(), "out of range chunk {:?}", self);
        match *self {
            Chunk::Run(length) => out.push(TAG_RUN | (length.wrapping_sub(1) & PAYLOAD_MASK)),
            Chunk::Index(slot) => out.push(TAG_INDEX | (slot & PAYLOAD_MASK)),
            Chunk::Diff { dr, dg, db } => {
                let dr = (dr + 2) as u8;
                let dg = (dg + 2) as u8;
                let db = (db + 2) as u8;
                out.push(TAG_DIFF | (dr & 0b11) << 4 | (dg & 0b11) << 2 | (db & 0b11));
            }
            Chunk::Luma { dg, dr_dg, db_dg } => {
                let dg = (dg + 32) as u8;
                let dr_dg = (dr_dg + 8) as u8;
                let db_dg = (db_dg + 8) as u8;
                out.push(TAG_LUMA | (dg & PAYLOAD_MASK));
                out.push((dr_dg & 0x0f) << 4 | (db_dg & 0x0f));
            }
            Chunk::Rgb { r, g, b } => out.extend_from_slice(&[TAG_RGB, r, g, b]),
            Chunk::Rgba(pixel) => {
                out.push(TAG_RGBA);
                out.extend_from_slice(&pixel.to_array());
            }
        }
    }

    /// Parses the chunk at the start of `data`, returning it with its size.
    ///
    /// Every tag byte is accepted; `None` only means `data` ends before the
    /// chunk does.
    pub fn read(data: &[u8]) -> Option<(Chunk, usize)> {
        let (&tag, rest) = data.split_first()?;

        let chunk = match tag {
            TAG_RGB => match *rest.get(..3)? {
                [r, g, b] => Chunk::Rgb { r, g, b },
                _ => return None,
            },
            TAG_RGBA => match *rest.get(..4)? {
                [r, g, b, a] => Chunk::Rgba(Pixel::new(r, g, b, a)),
                _ => return None,
            },
            _ => match tag & TAG_MASK {
                TAG_INDEX => Chunk::Index(tag & PAYLOAD_MASK),
                TAG_DIFF => Chunk::Diff {
                    dr: ((tag >> 4) & 0b11) as i8 - 2,
                    dg: ((tag >> 2) & 0b11) as i8 - 2,
                    db: (tag & 0b11) as i8 - 2,
                },
                TAG_LUMA => {
                    let second = *rest.first()?;
                    Chunk::Luma {
                        dg: (tag & PAYLOAD_MASK) as i8 - 32,
                        dr_dg: (second >> 4) as i8 - 8,
                        db_dg: (second & 0x0f) as i8 - 8,
                    }
                }
                _ => Chunk::Run((tag & PAYLOAD_MASK) + 1),
            },
        };

        Some((chunk, chunk.encoded_len()))
    }

    /// The pixel this chunk stands for, given the previous pixel.
    ///
    /// For a run this is the repeated pixel; the history is only read.
    pub fn reconstruct(&self, previous: Pixel, history: &PixelHistory) -> Pixel {
        match *self {
            Chunk::Run(_) => previous,
            Chunk::Index(slot) => history.get(slot),
            Chunk::Diff { dr, dg, db } => Pixel::new(
                apply_delta(previous.r(), dr),
                apply_delta(previous.g(), dg),
                apply_delta(previous.b(), db),
                previous.a(),
            ),
            Chunk::Luma { dg, dr_dg, db_dg } => Pixel::new(
                apply_delta(apply_delta(previous.r(), dg), dr_dg),
                apply_delta(previous.g(), dg),
                apply_delta(apply_delta(previous.b(), dg), db_dg),
                previous.a(),
            ),
            Chunk::Rgb { r, g, b } => Pixel::new(r, g, b, previous.a()),
            Chunk::Rgba(pixel) => pixel,
        }
    }
}
