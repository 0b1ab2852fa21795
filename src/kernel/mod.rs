//! 1-D convolution kernels and the encoding specializer.
//!
//! A box filter is represented as the degenerate kernel whose weights are all
//! one; the dense engine recognises it and runs the running-sum recurrence
//! instead of a weighted dot product.
pub mod specialize;

pub use self::specialize::{
    box_filter_pair, AccumCast, Accumulate, AnyImage, BoxFilterPair,
};

/// Weight types usable in a [`Kernel1D`].
pub trait KernelWeight: Copy + PartialEq {
    const ONE: Self;
}

impl KernelWeight for i32 {
    const ONE: Self = 1;
}

impl KernelWeight for f32 {
    const ONE: Self = 1.0;
}

/// Symmetric-width 1-D kernel: `width() == 2 * radius + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1D<W> {
    radius: usize,
    weights: Vec<W>,
}

impl<W> Kernel1D<W> {
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn width(&self) -> usize {
        2 * self.radius + 1
    }

    #[inline]
    pub fn weights(&self) -> &[W] {
        &self.weights
    }
}

impl<W: KernelWeight> Kernel1D<W> {
    /// Wrap explicit taps.
    ///
    /// # Panics
    /// Panics if `weights.len() != 2 * radius + 1`.
    pub fn new(radius: usize, weights: Vec<W>) -> Self {
        assert_eq!(
            weights.len(),
            2 * radius + 1,
            "kernel taps must equal 2*radius+1"
        );
        Self { radius, weights }
    }

    /// The degenerate all-ones kernel of the given radius.
    pub fn box_filter(radius: usize) -> Self {
        Self {
            radius,
            weights: vec![W::ONE; 2 * radius + 1],
        }
    }

    /// True when every weight equals one, enabling the running-sum path.
    pub fn is_box(&self) -> bool {
        self.weights.iter().all(|&w| w == W::ONE)
    }
}
