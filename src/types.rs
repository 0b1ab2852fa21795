use serde::{Deserialize, Serialize};

/// Correspondence between a key-frame location and its current-frame
/// location, as produced by a point tracker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssociatedPair {
    /// Location in the key (reference) frame.
    pub key: [f32; 2],
    /// Location in the current frame.
    pub curr: [f32; 2],
}

impl AssociatedPair {
    pub fn new(key: [f32; 2], curr: [f32; 2]) -> Self {
        Self { key, curr }
    }
}

/// Explicit stabilizer state after a processed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    /// Motion was fitted and the frame was rendered against the reference.
    Stable,
    /// Tracking degraded; the current frame became the new reference and the
    /// accumulated motion was reset to identity.
    KeyframeReset,
}

/// Per-frame stabilization report.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub state: ControllerState,
    /// Correspondences the tracker considered active this frame.
    pub active_tracks: usize,
    /// Size of the fitter's inlier set (zero when no fit ran).
    pub inliers: usize,
    /// True when the keyframe moved to this frame without a motion reset.
    pub keyframe_updated: bool,
    pub latency_ms: f64,
}
