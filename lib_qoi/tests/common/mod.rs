#![allow(dead_code)]

use lib_qoi::Pixel;

/// Small deterministic generator so fixtures are identical on every run.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u8(&mut self) -> u8 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

pub fn random_rgba(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..width * height * 4).map(|_| rng.next_u8()).collect()
}

pub fn random_rgb(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..width * height * 3).map(|_| rng.next_u8()).collect()
}

/// Horizontal and vertical ramps, mostly DIFF and LUMA territory.
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(2).saturating_sub(1)) as u8,
                (y * 255 / height.max(2).saturating_sub(1)) as u8,
                ((x + y) % 256) as u8,
                255,
            ]);
        }
    }
    data
}

/// Few colors, long repeats and alpha changes: exercises every chunk kind.
pub fn palette_noise(count: usize, seed: u64) -> Vec<Pixel> {
    const PALETTE: [Pixel; 8] = [
        Pixel::new(0, 0, 0, 255),
        Pixel::new(255, 255, 255, 255),
        Pixel::new(200, 30, 30, 255),
        Pixel::new(201, 31, 29, 255),
        Pixel::new(210, 40, 25, 255),
        Pixel::new(30, 200, 30, 128),
        Pixel::new(0, 0, 0, 0),
        Pixel::new(12, 34, 56, 255),
    ];

    let mut rng = Lcg::new(seed);
    let mut pixels = Vec::with_capacity(count);
    while pixels.len() < count {
        let color = PALETTE[(rng.next_u8() % 8) as usize];
        let repeat = 1 + (rng.next_u8() % 4) as usize * (rng.next_u8() % 40) as usize;
        for _ in 0..repeat.min(count - pixels.len()) {
            pixels.push(color);
        }
    }
    pixels
}
