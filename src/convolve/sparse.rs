//! Sparse separable convolution: evaluate a 2-D separable kernel at one
//! coordinate.
//!
//! There is no amortization across outputs here, so the value is computed by
//! explicit weighted summation: one horizontal dot product per window row
//! into `storage`, then a vertical dot product over `storage`. With box
//! kernels the result matches the dense running-sum engine (exactly for
//! integer encodings).
use crate::image::ImageView;
use crate::kernel::{Accumulate, Kernel1D};

/// Evaluate the separable convolution `kernel_h × kernel_v` centred on
/// `(cx, cy)`.
///
/// `storage` is caller-provided scratch of at least `kernel_v.width()`
/// elements, reusable across calls.
///
/// # Panics
/// Panics if the kernel window extends outside the image or `storage` is too
/// short.
pub fn evaluate_at<S>(
    kernel_h: &Kernel1D<S::Weight>,
    kernel_v: &Kernel1D<S::Weight>,
    image: &ImageView<'_, S>,
    cx: usize,
    cy: usize,
    storage: &mut [S::Accum],
) -> S::Accum
where
    S: Accumulate,
{
    evaluate_at_offset(
        kernel_h,
        kernel_v,
        image,
        cx,
        cy,
        kernel_h.radius(),
        kernel_v.radius(),
        storage,
    )
}

/// Evaluate with an explicit window anchor: the window starts at
/// `(cx - offset_x, cy - offset_y)`. Feature descriptors use this to sample
/// off-centre positions without re-centring the kernel.
///
/// # Panics
/// Panics if the anchored window extends outside the image or `storage` is
/// too short.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_at_offset<S>(
    kernel_h: &Kernel1D<S::Weight>,
    kernel_v: &Kernel1D<S::Weight>,
    image: &ImageView<'_, S>,
    cx: usize,
    cy: usize,
    offset_x: usize,
    offset_y: usize,
    storage: &mut [S::Accum],
) -> S::Accum
where
    S: Accumulate,
{
    let width_h = kernel_h.width();
    let width_v = kernel_v.width();

    assert!(
        cx >= offset_x && cy >= offset_y,
        "window anchor outside the image"
    );
    let x0 = cx - offset_x;
    let y0 = cy - offset_y;
    assert!(
        x0 + width_h <= image.w && y0 + width_v <= image.h,
        "kernel window extends outside the image"
    );
    assert!(storage.len() >= width_v, "storage shorter than the kernel");

    let weights_h = kernel_h.weights();
    for (i, slot) in storage.iter_mut().enumerate().take(width_v) {
        let mut index = (y0 + i) * image.stride + x0;
        let mut total = S::Accum::default();
        for &w in weights_h.iter() {
            total += image.data[index].widen() * S::weight_to_accum(w);
            index += 1;
        }
        *slot = total;
    }

    let mut total = S::Accum::default();
    for (i, &w) in kernel_v.weights().iter().enumerate() {
        total += storage[i] * S::weight_to_accum(w);
    }
    total
}
