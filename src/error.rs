use core::fmt;

use crate::image::PixelKind;

/// Errors reported by the convolution and distortion engines.
///
/// Recoverable tracking events (fit failure, too few correspondences) are not
/// errors; they drive the stabilizer's keyframe state machine instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied argument violates an engine precondition, e.g. a
    /// destination image whose size differs from the configured map size.
    InvalidArgument { what: &'static str },
    /// No convolution specialization exists for this encoding pair. Raised
    /// when the pair is selected, never during pixel processing.
    UnsupportedType { src: PixelKind, dst: PixelKind },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { what } => write!(f, "invalid argument: {what}"),
            Self::UnsupportedType { src, dst } => {
                write!(f, "unsupported encoding pair: {src:?} -> {dst:?}")
            }
        }
    }
}

impl std::error::Error for Error {}
