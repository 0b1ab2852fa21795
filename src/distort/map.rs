//! Pixel-remap distortion engine.
//!
//! The engine precomputes one source coordinate per destination pixel from a
//! geometric transform, then resamples with sub-pixel interpolation. The map
//! is owned by the engine and rebuilt from scratch on every model change.
use super::border::BorderPolicy;
use super::interp::{BilinearInterp, Interpolator};
use super::transform::PixelTransform;
use crate::error::Error;
use crate::image::ImageF32;

pub struct DistortMap<I: Interpolator = BilinearInterp> {
    width: usize,
    height: usize,
    /// One (src_x, src_y) entry per destination pixel, row-major.
    map: Vec<[f32; 2]>,
    interp: I,
    border: BorderPolicy,
}

impl DistortMap<BilinearInterp> {
    /// Engine for a `width x height` destination with bilinear resampling.
    pub fn new(width: usize, height: usize, border: BorderPolicy) -> Self {
        Self::with_interp(width, height, border, BilinearInterp)
    }
}

impl<I: Interpolator> DistortMap<I> {
    pub fn with_interp(width: usize, height: usize, border: BorderPolicy, interp: I) -> Self {
        Self {
            width,
            height,
            map: vec![[0.0, 0.0]; width * height],
            interp,
            border,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn border(&self) -> BorderPolicy {
        self.border
    }

    /// Recompute the whole pixel map from `model`. O(width * height); the
    /// previous map is fully overwritten, never patched.
    pub fn set_model(&mut self, model: &dyn PixelTransform) {
        let mut index = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let (sx, sy) = model.compute(x, y);
                self.map[index] = [sx, sy];
                index += 1;
            }
        }
    }

    /// Remap the full destination image.
    pub fn apply(&self, src: &ImageF32, dst: &mut ImageF32) -> Result<(), Error> {
        self.apply_region(src, dst, 0, 0, self.width, self.height)
    }

    /// Remap destination pixels inside `[x0, x1) x [y0, y1)`.
    ///
    /// Each mapped source coordinate is classified once: safe interior runs
    /// the unchecked interpolation path, the in-bounds margin band runs the
    /// checked path, and outside coordinates go through the border policy
    /// (`Skip` leaves the destination pixel untouched).
    pub fn apply_region(
        &self,
        src: &ImageF32,
        dst: &mut ImageF32,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(), Error> {
        if dst.w != self.width || dst.h != self.height {
            return Err(Error::InvalidArgument {
                what: "destination size differs from the configured map size",
            });
        }
        if x1 > self.width || y1 > self.height || x0 > x1 || y0 > y1 {
            return Err(Error::InvalidArgument {
                what: "region exceeds the destination bounds",
            });
        }
        if src.w == 0 || src.h == 0 {
            return Err(Error::InvalidArgument {
                what: "source image is empty",
            });
        }

        let sview = src.as_view();

        let min_x = self.interp.unsafe_border_x() as f32;
        let min_y = self.interp.unsafe_border_y() as f32;
        let max_x = src.w.saturating_sub(self.interp.unsafe_border_x()) as f32;
        let max_y = src.h.saturating_sub(self.interp.unsafe_border_y()) as f32;

        let width_f = src.w as f32;
        let height_f = src.h as f32;

        for y in y0..y1 {
            let mut map_index = y * self.width + x0;
            let mut dst_index = y * dst.stride + x0;
            for _ in x0..x1 {
                let [sx, sy] = self.map[map_index];

                if sx < min_x || sx >= max_x || sy < min_y || sy >= max_y {
                    if sx >= 0.0 && sx < width_f && sy >= 0.0 && sy < height_f {
                        dst.data[dst_index] = self.interp.get(&sview, sx, sy);
                    } else if let Some(v) =
                        self.border.outside(&sview, sx as i32, sy as i32)
                    {
                        dst.data[dst_index] = v;
                    }
                } else {
                    // SAFETY: the classification above keeps (sx, sy) at
                    // least the interpolator's declared margin away from
                    // every border.
                    dst.data[dst_index] =
                        unsafe { self.interp.get_unsafe(&sview, sx, sy) };
                }

                map_index += 1;
                dst_index += 1;
            }
        }
        Ok(())
    }
}
