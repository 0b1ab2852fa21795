//! Stabilization controller: a state machine composing a point tracker, a
//! robust motion fitter, and the distortion engine.
pub mod collaborators;
pub mod controller;
pub mod fitter;
pub mod params;

pub use self::collaborators::{MotionFitter, PointTracker};
pub use self::controller::FrameStabilizer;
pub use self::fitter::LeastSquaresAffine;
pub use self::params::StabilizeParams;
