use crate::constants::HISTORY_SIZE;
use crate::image::format::Pixel;

/// Hash-addressed cache of recently seen pixels.
///
/// A fresh table belongs to exactly one encode or decode pass.
#[derive(Clone, Debug)]
pub struct PixelHistory {
    slots: [Pixel; HISTORY_SIZE],
}

impl Default for PixelHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelHistory {
    pub fn new() -> Self {
        Self {
            slots: [Pixel::ZERO; HISTORY_SIZE],
        }
    }

    /// Slot index for `pixel`: `(r*3 + g*5 + b*7 + a*11) % 64`.
    pub fn lookup(pixel: Pixel) -> u8 {
        let hash = pixel.r() as u32 * 3
            + pixel.g() as u32 * 5
            + pixel.b() as u32 * 7
            + pixel.a() as u32 * 11;
        (hash % HISTORY_SIZE as u32) as u8
    }

    /// Only the low 6 bits of `slot` are used.
    pub fn get(&self, slot: u8) -> Pixel {
        self.slots[slot as usize % HISTORY_SIZE]
    }

    pub fn matches(&self, pixel: Pixel) -> bool {
        self.get(Self::lookup(pixel)) == pixel
    }

    pub fn store(&mut self, pixel: Pixel) {
        self.slots[Self::lookup(pixel) as usize] = pixel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hash() {
        assert_eq!(PixelHistory::lookup(Pixel::ZERO), 0);
        // 255 * 11 = 2805, 2805 % 64 = 53
        assert_eq!(PixelHistory::lookup(Pixel::OPAQUE_BLACK), 53);
        // 10*3 + 20*5 + 30*7 + 40*11 = 780, 780 % 64 = 12
        assert_eq!(PixelHistory::lookup(Pixel::new(10, 20, 30, 40)), 12);
        // no overflow at the top of the range
        assert_eq!(
            PixelHistory::lookup(Pixel::new(255, 255, 255, 255)),
            ((255 * 26) % 64) as u8
        );
    }

    #[test]
    fn test_fresh_table_is_zeroed() {
        let history = PixelHistory::new();
        for slot in 0..64 {
            assert_eq!(history.get(slot), Pixel::ZERO);
        }
        assert!(history.matches(Pixel::ZERO));
        assert!(!history.matches(Pixel::OPAQUE_BLACK));
    }

    #[test]
    fn test_store_overwrites_colliding_slot() {
        let mut history = PixelHistory::new();
        let first = Pixel::new(1, 0, 0, 0); // 3
        let second = Pixel::new(0, 0, 0, 5); // 55 % 64 = 55
        let collides = Pixel::new(22, 0, 0, 0); // 66 % 64 = 2
        let also_two = Pixel::new(0, 0, 0, 6); // 66 % 64 = 2

        history.store(first);
        history.store(second);
        history.store(collides);
        assert!(history.matches(first));
        assert!(history.matches(second));
        assert!(history.matches(collides));

        history.store(also_two);
        assert!(!history.matches(collides));
        assert_eq!(history.get(2), also_two);
    }
}
