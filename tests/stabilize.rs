//! Stabilizer state-machine behavior with scripted collaborators.
mod common;

use common::synthetic_image::checkerboard_f32;
use frame_stab::image::ImageF32;
use frame_stab::stabilize::{LeastSquaresAffine, PointTracker};
use frame_stab::types::AssociatedPair;
use frame_stab::{ControllerState, FrameStabilizer, StabilizeParams};
use nalgebra::Matrix3;

/// What the scripted tracker reports on a given frame.
#[derive(Clone, Copy)]
enum FrameScript {
    /// A healthy grid of correspondences, each translated by `(dx, dy)`.
    Translated(f32, f32),
    /// Enough tracks, but all collinear: the affine fit must fail.
    Degenerate,
    /// Tracking collapsed to almost nothing.
    Lost,
}

struct ScriptedTracker {
    script: Vec<FrameScript>,
    frame: usize,
    tracks: Vec<AssociatedPair>,
    keyframe_calls: usize,
    spawn_calls: usize,
}

impl ScriptedTracker {
    fn new(script: Vec<FrameScript>) -> Self {
        Self {
            script,
            frame: 0,
            tracks: Vec::new(),
            keyframe_calls: 0,
            spawn_calls: 0,
        }
    }

    fn grid() -> Vec<[f32; 2]> {
        let mut pts = Vec::new();
        for gy in 0..3 {
            for gx in 0..4 {
                pts.push([10.0 + 12.0 * gx as f32, 8.0 + 10.0 * gy as f32]);
            }
        }
        pts
    }
}

impl PointTracker for ScriptedTracker {
    fn process(&mut self, _image: &ImageF32) {
        let script = self.script[self.frame];
        self.frame += 1;
        self.tracks.clear();
        match script {
            FrameScript::Translated(dx, dy) => {
                for p in Self::grid() {
                    self.tracks
                        .push(AssociatedPair::new(p, [p[0] + dx, p[1] + dy]));
                }
            }
            FrameScript::Degenerate => {
                for i in 0..12 {
                    let p = [i as f32 * 3.0, 5.0];
                    self.tracks.push(AssociatedPair::new(p, [p[0] + 1.0, 5.0]));
                }
            }
            FrameScript::Lost => {
                self.tracks
                    .push(AssociatedPair::new([1.0, 1.0], [1.0, 1.0]));
            }
        }
    }

    fn active_tracks(&self) -> &[AssociatedPair] {
        &self.tracks
    }

    fn set_keyframe(&mut self) {
        self.keyframe_calls += 1;
    }

    fn spawn_tracks(&mut self) {
        self.spawn_calls += 1;
    }
}

fn stabilizer_with(
    script: Vec<FrameScript>,
    params: StabilizeParams,
) -> FrameStabilizer<ScriptedTracker, LeastSquaresAffine> {
    FrameStabilizer::new(params, ScriptedTracker::new(script), LeastSquaresAffine::new(2.0))
}

fn params() -> StabilizeParams {
    StabilizeParams {
        reset_threshold: 5,
        // higher than the scripted track count: every stable frame chains
        // the motion and moves the keyframe forward
        change_threshold: 99,
        distance_threshold: 100.0,
        probe_point: [0.0, 0.0],
    }
}

#[test]
fn track_loss_resets_motion_and_passes_the_frame_through() {
    let script = vec![
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Lost,
        FrameScript::Translated(2.0, 0.0),
    ];
    let mut stab = stabilizer_with(script, params());
    let input = checkerboard_f32(64, 48, 8);

    for frame in 0..5 {
        let report = stab.process(&input);
        assert_eq!(report.state, ControllerState::Stable, "frame {frame}");
        assert!(report.keyframe_updated, "frame {frame} chains the keyframe");
    }
    // five chained 2-px translations
    assert!((stab.total_motion()[(0, 2)] - 10.0).abs() < 1e-3);

    let report = stab.process(&input);
    assert_eq!(report.state, ControllerState::KeyframeReset);
    assert_eq!(report.inliers, 0, "no fit ran on the lost frame");

    // motion reset to identity, frame copied through unmodified
    assert_eq!(stab.total_motion(), &Matrix3::identity());
    let out = stab.stabilized().expect("frame processed");
    assert_eq!(out.data, input.data);

    // recovery on the next frame
    let report = stab.process(&input);
    assert_eq!(report.state, ControllerState::Stable);
}

#[test]
fn fit_failure_is_a_reset_not_an_error() {
    let script = vec![FrameScript::Degenerate];
    let mut stab = stabilizer_with(script, params());
    let input = checkerboard_f32(32, 32, 4);

    let report = stab.process(&input);
    assert_eq!(report.state, ControllerState::KeyframeReset);
    assert_eq!(stab.total_motion(), &Matrix3::identity());
}

#[test]
fn excessive_probe_displacement_resets_the_reference() {
    let mut p = params();
    p.distance_threshold = 5.0;
    // each frame chains another 4 px; the second candidate displaces the
    // probe by 8 px and trips the threshold
    let script = vec![
        FrameScript::Translated(4.0, 0.0),
        FrameScript::Translated(4.0, 0.0),
    ];
    let mut stab = stabilizer_with(script, p);
    let input = checkerboard_f32(32, 32, 4);

    assert_eq!(stab.process(&input).state, ControllerState::Stable);
    assert_eq!(stab.process(&input).state, ControllerState::KeyframeReset);
}

#[test]
fn stable_frames_render_through_the_distortion_engine() {
    let script = vec![FrameScript::Translated(3.0, 0.0)];
    let mut stab = stabilizer_with(script, params());
    let input = checkerboard_f32(64, 48, 8);

    let report = stab.process(&input);
    assert_eq!(report.state, ControllerState::Stable);
    assert_eq!(report.active_tracks, 12);
    assert_eq!(report.inliers, 12);

    // candidate motion is a 3-px translation: dst (x,y) samples (x+3, y)
    let out = stab.stabilized().expect("frame processed");
    assert_eq!(out.get(10, 10), input.get(13, 10));
    assert_eq!(out.get(40, 20), input.get(43, 20));
}

#[test]
fn high_inlier_count_leaves_the_keyframe_alone() {
    // low change threshold: inliers (12) never drop below it, so the
    // keyframe stays put and no motion is chained
    let mut p = params();
    p.change_threshold = 3;
    let script = vec![
        FrameScript::Translated(2.0, 0.0),
        FrameScript::Translated(2.0, 0.0),
    ];
    let mut stab = stabilizer_with(script, p);
    let input = checkerboard_f32(32, 32, 4);

    let r0 = stab.process(&input);
    assert!(!r0.keyframe_updated);
    assert_eq!(stab.total_motion(), &Matrix3::identity());

    let r1 = stab.process(&input);
    assert!(!r1.keyframe_updated);
    assert_eq!(stab.total_motion(), &Matrix3::identity());
}
