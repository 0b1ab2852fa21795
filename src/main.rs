use frame_stab::config::load_config;
use frame_stab::distort::{transform_point, AffineTransform, BorderPolicy, DistortMap};
use frame_stab::image::io::{load_grayscale_image, save_grayscale_f32, write_json_file};
use frame_stab::image::{u8_to_f32, ImageF32};
use frame_stab::stabilize::{LeastSquaresAffine, PointTracker};
use frame_stab::types::AssociatedPair;
use frame_stab::{FrameReport, FrameStabilizer, StabilizeParams};
use nalgebra::Matrix3;
use std::path::Path;

/// Tracker fed with scripted ground-truth motion, for demonstration only:
/// correspondences are generated from the known per-frame transform instead
/// of being measured in the image.
struct ScriptedTracker {
    /// Content anchor points in base-image coordinates.
    anchors: Vec<[f32; 2]>,
    /// base -> key-frame pixel positions.
    to_key: Matrix3<f32>,
    /// base -> current-frame pixel positions.
    to_curr: Matrix3<f32>,
    tracks: Vec<AssociatedPair>,
}

impl ScriptedTracker {
    fn new(width: usize, height: usize) -> Self {
        let mut anchors = Vec::new();
        let step = (width.min(height) / 8).max(4);
        for y in (step / 2..height.saturating_sub(step / 2)).step_by(step) {
            for x in (step / 2..width.saturating_sub(step / 2)).step_by(step) {
                anchors.push([x as f32, y as f32]);
            }
        }
        Self {
            anchors,
            to_key: Matrix3::identity(),
            to_curr: Matrix3::identity(),
            tracks: Vec::new(),
        }
    }

    /// Tell the tracker where the current frame's content sits relative to
    /// the base image.
    fn set_frame_motion(&mut self, to_curr: Matrix3<f32>) {
        self.to_curr = to_curr;
    }
}

impl PointTracker for ScriptedTracker {
    fn process(&mut self, _image: &ImageF32) {
        self.tracks.clear();
        for &a in &self.anchors {
            self.tracks.push(AssociatedPair::new(
                transform_point(&self.to_key, a),
                transform_point(&self.to_curr, a),
            ));
        }
    }

    fn active_tracks(&self) -> &[AssociatedPair] {
        &self.tracks
    }

    fn set_keyframe(&mut self) {
        self.to_key = self.to_curr;
    }

    fn spawn_tracks(&mut self) {
        // anchors are fixed in this scripted setup
    }
}

fn checkerboard(width: usize, height: usize, cell: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / cell) + (y / cell)) % 2 == 0 {
                40.0
            } else {
                210.0
            };
            img.set(x, y, v);
        }
    }
    img
}

/// Per-frame camera jitter: translation that drifts over the sequence.
fn jitter(frame: usize) -> Matrix3<f32> {
    let t = frame as f32;
    let tx = 3.0 * (t * 0.9).sin() + 0.8 * t;
    let ty = 2.0 * (t * 1.3).cos() - 0.4 * t;
    AffineTransform::translation(tx, ty).m
}

fn run_sequence(
    base: &ImageF32,
    params: StabilizeParams,
    frames: usize,
    debug_dir: Option<&Path>,
    json_out: Option<&Path>,
) {
    let tracker = ScriptedTracker::new(base.w, base.h);
    let fitter = LeastSquaresAffine::new(2.0);
    let mut stabilizer = FrameStabilizer::new(params, tracker, fitter);

    // renders the jittered input frames
    let mut shake = DistortMap::new(base.w, base.h, BorderPolicy::Extend);
    let mut frame = ImageF32::new(base.w, base.h);

    let mut reports: Vec<FrameReport> = Vec::with_capacity(frames);
    for i in 0..frames {
        // dst -> src model for rendering: frame pixel p samples base at J(p)
        let j = jitter(i);
        shake.set_model(&AffineTransform::new(j));
        shake.apply(base, &mut frame).expect("matching dimensions");

        // content at base coord q sits at J^-1(q) in the frame
        let to_curr = j.try_inverse().expect("translations are invertible");
        stabilizer.tracker_mut().set_frame_motion(to_curr);

        let report = stabilizer.process(&frame);
        println!(
            "frame {i}: state={:?} tracks={} inliers={} latency_ms={:.3}",
            report.state, report.active_tracks, report.inliers, report.latency_ms
        );

        if let Some(dir) = debug_dir {
            let out = stabilizer.stabilized().expect("frame processed");
            if let Err(e) = save_grayscale_f32(out, &dir.join(format!("stabilized_{i:03}.png"))) {
                eprintln!("{e}");
            }
        }
        reports.push(report);
    }

    if let Some(path) = json_out {
        if let Err(e) = write_json_file(path, &reports) {
            eprintln!("{e}");
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1) {
        Some(config_path) => {
            let config = match load_config(Path::new(config_path)) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            let gray = match load_grayscale_image(&config.input_path) {
                Ok(img) => img,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            let base = u8_to_f32(&gray);
            run_sequence(
                &base,
                config.stabilize,
                12,
                config.output.debug_dir.as_deref(),
                config.output.json_out.as_deref(),
            );
        }
        None => {
            // Demo stub: synthetic checkerboard sequence with scripted jitter
            let base = checkerboard(640, 480, 32);
            let params = StabilizeParams {
                reset_threshold: 10,
                change_threshold: 10,
                // low enough that the drifting jitter trips a keyframe reset
                // late in the sequence
                distance_threshold: 8.0,
                probe_point: [320.0, 240.0],
            };
            run_sequence(&base, params, 12, None, None);
        }
    }
}
