//! Owned single-channel image in row-major layout.
//!
//! Rows are `stride` elements apart; `stride >= w` allows padded layouts.
//! Zero-copy sub-regions are taken through [`ImageView`]/[`ImageViewMut`].
use super::pixel::Pixel;
use super::view::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (`>= w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<T>,
}

pub type ImageU8 = Image<u8>;
pub type ImageS16 = Image<i16>;
pub type ImageS32 = Image<i32>;
pub type ImageF32 = Image<f32>;

impl<T: Pixel> Image<T> {
    /// Construct a zero-initialized buffer of size `w × h` with `stride == w`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::new_with_stride(w, h, w)
    }

    /// Construct a zero-initialized buffer with an explicit row stride.
    ///
    /// # Panics
    /// Panics if `stride < w`.
    pub fn new_with_stride(w: usize, h: usize, stride: usize) -> Self {
        assert!(stride >= w, "stride ({stride}) must be >= width ({w})");
        Self {
            w,
            h,
            stride,
            data: vec![T::default(); h * stride],
        }
    }

    /// Wrap an existing tightly packed buffer (`stride == w`).
    ///
    /// # Panics
    /// Panics if `data.len() != w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), w * h, "buffer length must equal w * h");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    /// Borrow the whole image as a read-only view.
    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &self.data,
        }
    }

    /// Borrow the whole image as a mutable view.
    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            w: self.w,
            h: self.h,
            stride: self.stride,
            data: &mut self.data,
        }
    }

    /// Copy every pixel from `src`, which must have identical dimensions.
    ///
    /// # Panics
    /// Panics if dimensions differ.
    pub fn copy_from(&mut self, src: &Image<T>) {
        assert!(
            self.w == src.w && self.h == src.h,
            "copy_from requires matching dimensions"
        );
        for y in 0..self.h {
            let start = y * self.stride;
            let sstart = y * src.stride;
            self.data[start..start + self.w].copy_from_slice(&src.data[sstart..sstart + src.w]);
        }
    }
}

/// Convert an 8-bit image into raw-intensity f32 (no normalization).
pub fn u8_to_f32(src: &Image<u8>) -> Image<f32> {
    let mut out = Image::<f32>::new(src.w, src.h);
    for y in 0..src.h {
        let s = src.row(y);
        let d = out.row_mut(y);
        for x in 0..src.w {
            d[x] = s[x] as f32;
        }
    }
    out
}
