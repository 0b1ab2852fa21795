use frame_stab::image::{Image, ImageF32, Pixel};

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_f32(width: usize, height: usize, cell: usize) -> ImageF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let sum = (x / cell) + (y / cell);
            let val = if sum % 2 == 0 { 32.0 } else { 220.0 };
            img.set(x, y, val);
        }
    }
    img
}

/// Deterministic xorshift generator for reproducible noise images.
pub struct XorShift(pub u32);

impl XorShift {
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// Image filled with deterministic pseudo-random values in `[0, max)`.
pub fn noise_image<T: Pixel>(width: usize, height: usize, max: u32, seed: u32) -> Image<T> {
    let mut rng = XorShift(seed.max(1));
    let mut img = Image::<T>::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, T::from_f32((rng.next_u32() % max) as f32));
        }
    }
    img
}
