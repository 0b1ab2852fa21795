use serde::{Deserialize, Serialize};

/// Thresholds controlling the stabilizer's keyframe state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StabilizeParams {
    /// Active-track count below which the reference frame is reset.
    pub reset_threshold: usize,
    /// Inlier count below which the keyframe moves to the current frame
    /// (accumulated motion is kept).
    pub change_threshold: usize,
    /// Probe displacement (pixels) beyond which the reference frame is
    /// considered too stale.
    pub distance_threshold: f32,
    /// Fixed point whose displacement under the candidate motion is probed.
    pub probe_point: [f32; 2],
}

impl Default for StabilizeParams {
    fn default() -> Self {
        Self {
            reset_threshold: 15,
            change_threshold: 50,
            distance_threshold: 80.0,
            probe_point: [0.0, 0.0],
        }
    }
}
