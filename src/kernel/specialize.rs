//! Compile-time specialization of the convolution engines over pixel
//! encodings.
//!
//! Each supported (input, output) encoding pair gets its own monomorphized
//! `horizontal`/`vertical` implementation; the hot loops carry no branch on
//! element type. Runtime selection happens once, here, when a pair is looked
//! up — an unsupported pair fails with [`Error::UnsupportedType`] before any
//! pixel is processed.
use core::ops::{Add, AddAssign, Mul, Sub};

use crate::convolve::box_filter;
use crate::error::Error;
use crate::image::{Image, Pixel, PixelKind};

/// Accumulator selection per source encoding.
///
/// The accumulator must be wide enough that a full-window running sum never
/// overflows for any legal radius: an 8-bit row summed across the whole
/// addressable width still fits a signed 32-bit value, a 32-bit row needs 64.
pub trait Accumulate: Pixel {
    type Accum: Copy
        + Default
        + PartialEq
        + Add<Output = Self::Accum>
        + Sub<Output = Self::Accum>
        + AddAssign
        + Mul<Output = Self::Accum>;

    /// Kernel weight type paired with this encoding.
    type Weight: Copy;

    fn widen(self) -> Self::Accum;

    fn weight_to_accum(w: Self::Weight) -> Self::Accum;
}

impl Accumulate for u8 {
    type Accum = i32;
    type Weight = i32;

    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn weight_to_accum(w: i32) -> i32 {
        w
    }
}

impl Accumulate for i16 {
    type Accum = i32;
    type Weight = i32;

    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn weight_to_accum(w: i32) -> i32 {
        w
    }
}

impl Accumulate for i32 {
    type Accum = i64;
    type Weight = i32;

    #[inline(always)]
    fn widen(self) -> i64 {
        self as i64
    }

    #[inline(always)]
    fn weight_to_accum(w: i32) -> i64 {
        w as i64
    }
}

impl Accumulate for f32 {
    type Accum = f32;
    type Weight = f32;

    #[inline(always)]
    fn widen(self) -> f32 {
        self
    }

    #[inline(always)]
    fn weight_to_accum(w: f32) -> f32 {
        w
    }
}

/// Two-way cast between an output encoding and an accumulator type.
///
/// `from_accum` narrows with plain bit-width semantics on write-out;
/// `into_accum` widens a previously written output value back into the
/// accumulator, which the vertical recurrence relies on.
pub trait AccumCast<A>: Pixel {
    fn from_accum(a: A) -> Self;
    fn into_accum(self) -> A;
}

impl AccumCast<i32> for i16 {
    #[inline(always)]
    fn from_accum(a: i32) -> i16 {
        a as i16
    }

    #[inline(always)]
    fn into_accum(self) -> i32 {
        self as i32
    }
}

impl AccumCast<i32> for i32 {
    #[inline(always)]
    fn from_accum(a: i32) -> i32 {
        a
    }

    #[inline(always)]
    fn into_accum(self) -> i32 {
        self
    }
}

impl AccumCast<i64> for i32 {
    #[inline(always)]
    fn from_accum(a: i64) -> i32 {
        a as i32
    }

    #[inline(always)]
    fn into_accum(self) -> i64 {
        self as i64
    }
}

impl AccumCast<f32> for f32 {
    #[inline(always)]
    fn from_accum(a: f32) -> f32 {
        a
    }

    #[inline(always)]
    fn into_accum(self) -> f32 {
        self
    }
}

/// Image of any supported encoding, for callers whose pixel type is only
/// known at run time.
#[derive(Clone, Debug)]
pub enum AnyImage {
    U8(Image<u8>),
    S16(Image<i16>),
    S32(Image<i32>),
    F32(Image<f32>),
}

impl AnyImage {
    pub fn kind(&self) -> PixelKind {
        match self {
            Self::U8(_) => PixelKind::U8,
            Self::S16(_) => PixelKind::S16,
            Self::S32(_) => PixelKind::S32,
            Self::F32(_) => PixelKind::F32,
        }
    }
}

/// Variant extraction for the monomorphized wrappers below. The encoding was
/// validated when the pair was selected, so a mismatch here is a logic bug.
trait AnyPixel: Accumulate {
    fn unwrap_ref(img: &AnyImage) -> &Image<Self>;
    fn unwrap_mut(img: &mut AnyImage) -> &mut Image<Self>;
}

macro_rules! impl_any_pixel {
    ($t:ty, $variant:ident) => {
        impl AnyPixel for $t {
            fn unwrap_ref(img: &AnyImage) -> &Image<$t> {
                match img {
                    AnyImage::$variant(inner) => inner,
                    _ => unreachable!("encoding validated at specialization time"),
                }
            }

            fn unwrap_mut(img: &mut AnyImage) -> &mut Image<$t> {
                match img {
                    AnyImage::$variant(inner) => inner,
                    _ => unreachable!("encoding validated at specialization time"),
                }
            }
        }
    };
}

impl_any_pixel!(u8, U8);
impl_any_pixel!(i16, S16);
impl_any_pixel!(i32, S32);
impl_any_pixel!(f32, F32);

/// One pair of box-convolution functions bound to a validated encoding pair.
#[derive(Clone, Copy, Debug)]
pub struct BoxFilterPair {
    pub horizontal: fn(&AnyImage, &mut AnyImage, usize, bool),
    pub vertical: fn(&AnyImage, &mut AnyImage, usize, bool),
}

fn horizontal_any<S, D>(src: &AnyImage, dst: &mut AnyImage, radius: usize, include_border: bool)
where
    S: AnyPixel,
    D: AnyPixel + AccumCast<S::Accum>,
{
    let input = S::unwrap_ref(src).as_view();
    let mut output = D::unwrap_mut(dst).as_view_mut();
    box_filter::horizontal(&input, &mut output, radius, include_border);
}

fn vertical_any<S, D>(src: &AnyImage, dst: &mut AnyImage, radius: usize, include_border: bool)
where
    S: AnyPixel,
    D: AnyPixel + AccumCast<S::Accum>,
{
    let input = S::unwrap_ref(src).as_view();
    let mut output = D::unwrap_mut(dst).as_view_mut();
    box_filter::vertical(&input, &mut output, radius, include_border);
}

/// Select the monomorphized box-convolution pair for an encoding pair.
///
/// Supported pairs: u8→i16, u8→i32, i16→i32, i32→i32, f32→f32. Anything else
/// fails here, never during pixel processing.
pub fn box_filter_pair(src: PixelKind, dst: PixelKind) -> Result<BoxFilterPair, Error> {
    use PixelKind::*;
    let pair = match (src, dst) {
        (U8, S16) => BoxFilterPair {
            horizontal: horizontal_any::<u8, i16>,
            vertical: vertical_any::<u8, i16>,
        },
        (U8, S32) => BoxFilterPair {
            horizontal: horizontal_any::<u8, i32>,
            vertical: vertical_any::<u8, i32>,
        },
        (S16, S32) => BoxFilterPair {
            horizontal: horizontal_any::<i16, i32>,
            vertical: vertical_any::<i16, i32>,
        },
        (S32, S32) => BoxFilterPair {
            horizontal: horizontal_any::<i32, i32>,
            vertical: vertical_any::<i32, i32>,
        },
        (F32, F32) => BoxFilterPair {
            horizontal: horizontal_any::<f32, f32>,
            vertical: vertical_any::<f32, f32>,
        },
        (src, dst) => return Err(Error::UnsupportedType { src, dst }),
    };
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageS16, ImageU8};

    #[test]
    fn supported_pair_resolves_and_runs() {
        let src = AnyImage::U8(ImageU8::from_vec(5, 1, vec![1, 2, 3, 4, 5]));
        let mut dst = AnyImage::S16(ImageS16::new(5, 1));

        let fns = box_filter_pair(src.kind(), dst.kind()).expect("supported pair");
        (fns.horizontal)(&src, &mut dst, 1, true);

        match dst {
            AnyImage::S16(img) => assert_eq!(&img.data[1..4], &[6, 9, 12]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn unsupported_pair_fails_at_selection() {
        let err = box_filter_pair(PixelKind::F32, PixelKind::U8).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedType {
                src: PixelKind::F32,
                dst: PixelKind::U8
            }
        );
    }
}
