#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod convolve;
pub mod distort;
pub mod error;
pub mod image;
pub mod kernel;
pub mod stabilize;
pub mod types;

// Binary-facing configuration.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::Error;
pub use crate::stabilize::{FrameStabilizer, StabilizeParams};
pub use crate::types::{AssociatedPair, ControllerState, FrameReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use frame_stab::prelude::*;
///
/// # fn main() {
/// let src = ImageF32::new(320, 240);
/// let mut dst = ImageF32::new(320, 240);
///
/// let mut warp = DistortMap::new(320, 240, BorderPolicy::Zero);
/// warp.set_model(&AffineTransform::translation(1.5, -0.5));
/// warp.apply(&src, &mut dst).expect("matching dimensions");
/// # }
/// ```
pub mod prelude {
    pub use crate::distort::{AffineTransform, BorderPolicy, DistortMap, PixelTransform};
    pub use crate::image::{Image, ImageF32, ImageS16, ImageS32, ImageU8};
    pub use crate::kernel::Kernel1D;
    pub use crate::types::AssociatedPair;
    pub use crate::{ControllerState, FrameStabilizer, StabilizeParams};
}
