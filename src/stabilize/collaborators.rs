//! Collaborator contracts the stabilizer composes with.
//!
//! Trackers and fitters are injected and owned by the controller for the
//! duration of a run; the controller holds no other shared state.
use nalgebra::Matrix3;

use crate::image::ImageF32;
use crate::types::AssociatedPair;

/// Sequential point-feature tracker.
pub trait PointTracker {
    /// Advance the tracker by one frame.
    fn process(&mut self, image: &ImageF32);

    /// Correspondences currently tracked against the key frame.
    fn active_tracks(&self) -> &[AssociatedPair];

    /// Make the current frame the key frame.
    fn set_keyframe(&mut self);

    /// Spawn additional tracks in the current frame.
    fn spawn_tracks(&mut self);
}

/// Robust affine motion-model fitter.
pub trait MotionFitter {
    /// Fit a key->current affine model. Returns false when no model could be
    /// estimated; that is a recoverable event, not an error.
    fn process(&mut self, pairs: &[AssociatedPair], prior: Option<&Matrix3<f32>>) -> bool;

    /// The most recently fitted model.
    fn model(&self) -> Matrix3<f32>;

    /// Inlier subset consistent with the fitted model.
    fn match_set(&self) -> &[AssociatedPair];
}
