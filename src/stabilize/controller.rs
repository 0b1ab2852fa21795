//! Point-feature image stabilization over an affine motion model.
//!
//! Stabilization tracks point features against a key frame, robustly fits
//! the whole-image motion, and warps the current frame back into the
//! reference frame through the distortion engine. Motion from successive
//! keyframes is chained so the correction spans more than one keyframe; the
//! reference is reset when tracking degrades or the accumulated motion grows
//! too large.
use log::{debug, warn};
use nalgebra::Matrix3;
use std::time::Instant;

use super::collaborators::{MotionFitter, PointTracker};
use super::params::StabilizeParams;
use crate::distort::{distance_sq, transform_point, AffineTransform, BorderPolicy, DistortMap};
use crate::image::ImageF32;
use crate::types::{ControllerState, FrameReport};

pub struct FrameStabilizer<T: PointTracker, F: MotionFitter> {
    tracker: T,
    fitter: F,
    params: StabilizeParams,

    /// Reference-frame -> key-frame motion accumulated across keyframe
    /// updates; identity right after a reset.
    total_motion: Matrix3<f32>,
    state: ControllerState,

    // allocated on the first frame and reused afterwards
    distort: Option<DistortMap>,
    output: Option<ImageF32>,
}

impl<T: PointTracker, F: MotionFitter> FrameStabilizer<T, F> {
    pub fn new(params: StabilizeParams, tracker: T, fitter: F) -> Self {
        Self {
            tracker,
            fitter,
            params,
            total_motion: Matrix3::identity(),
            state: ControllerState::KeyframeReset,
            distort: None,
            output: None,
        }
    }

    /// Process one frame of the sequence and render the stabilized result
    /// into the internal output buffer.
    pub fn process(&mut self, input: &ImageF32) -> FrameReport {
        let start = Instant::now();

        if self.output.is_none() {
            self.output = Some(ImageF32::new(input.w, input.h));
            self.distort = Some(DistortMap::new(input.w, input.h, BorderPolicy::Skip));
        }

        self.tracker.process(input);
        let tracks = self.tracker.active_tracks();
        let active_tracks = tracks.len();

        let mut next = ControllerState::Stable;
        let mut inliers = 0;
        let mut keyframe_updated = false;

        if active_tracks < self.params.reset_threshold {
            // too few features remaining to track
            next = ControllerState::KeyframeReset;
        } else if !self.fitter.process(tracks, None) {
            next = ControllerState::KeyframeReset;
        } else {
            let fitted = self.fitter.model();
            // reference frame -> current frame: accumulated motion first,
            // then this frame's key->current fit
            let candidate = fitted * self.total_motion;

            let probe = self.params.probe_point;
            let moved = transform_point(&candidate, probe);
            let limit = self.params.distance_threshold * self.params.distance_threshold;

            if distance_sq(probe, moved) > limit {
                // not enough overlap with the reference frame
                next = ControllerState::KeyframeReset;
            } else {
                let distort = self.distort.as_mut().expect("allocated on first frame");
                distort.set_model(&AffineTransform::new(candidate));
                let output = self.output.as_mut().expect("allocated on first frame");
                distort
                    .apply(input, output)
                    .expect("output buffer matches the map dimensions");

                inliers = self.fitter.match_set().len();
                if inliers < self.params.change_threshold {
                    // keyframe update: chain the motion, keep the reference
                    self.total_motion = candidate;
                    self.tracker.set_keyframe();
                    self.tracker.spawn_tracks();
                    keyframe_updated = true;
                    debug!("keyframe update: {inliers} inliers remaining");
                }
            }
        }

        if next == ControllerState::KeyframeReset {
            warn!("keyframe reset: {active_tracks} active tracks");
            self.tracker.set_keyframe();
            self.tracker.spawn_tracks();
            let output = self.output.as_mut().expect("allocated on first frame");
            output.copy_from(input);
            self.total_motion = Matrix3::identity();
        }
        self.state = next;

        FrameReport {
            state: next,
            active_tracks,
            inliers,
            keyframe_updated,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// The stabilized image for the most recent frame, once one has been
    /// processed.
    pub fn stabilized(&self) -> Option<&ImageF32> {
        self.output.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn total_motion(&self) -> &Matrix3<f32> {
        &self.total_motion
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    /// Inlier correspondences from the most recent successful fit.
    pub fn inlier_features(&self) -> &[crate::types::AssociatedPair] {
        self.fitter.match_set()
    }
}
