//! Least-squares affine motion fitter.
//!
//! Solves the two independent 3-parameter rows of the affine model from the
//! normal equations over `[x, y, 1]`, classifies inliers by the squared
//! distance between the transformed key location and the observed current
//! location, and refits once on the inlier set.
use log::warn;
use nalgebra::{Matrix3, Vector3};

use super::collaborators::MotionFitter;
use crate::distort::{distance_sq, transform_point};
use crate::types::AssociatedPair;

const EPS: f32 = 1e-6;

pub struct LeastSquaresAffine {
    inlier_threshold_sq: f32,
    model: Matrix3<f32>,
    inliers: Vec<AssociatedPair>,
}

impl LeastSquaresAffine {
    /// `inlier_threshold` is the residual distance (pixels) separating
    /// inliers from outliers.
    pub fn new(inlier_threshold: f32) -> Self {
        Self {
            inlier_threshold_sq: inlier_threshold * inlier_threshold,
            model: Matrix3::identity(),
            inliers: Vec::new(),
        }
    }
}

fn fit_affine(pairs: &[AssociatedPair]) -> Option<Matrix3<f32>> {
    let mut a = Matrix3::<f32>::zeros();
    let mut bx = Vector3::<f32>::zeros();
    let mut by = Vector3::<f32>::zeros();

    for p in pairs {
        let v = Vector3::new(p.key[0], p.key[1], 1.0);
        a += v * v.transpose();
        bx += v * p.curr[0];
        by += v * p.curr[1];
    }

    if a.determinant().abs() <= EPS {
        return None;
    }
    let inv = a.try_inverse()?;
    let px = inv * bx;
    let py = inv * by;

    Some(Matrix3::new(
        px[0], px[1], px[2], //
        py[0], py[1], py[2], //
        0.0, 0.0, 1.0,
    ))
}

impl MotionFitter for LeastSquaresAffine {
    fn process(&mut self, pairs: &[AssociatedPair], _prior: Option<&Matrix3<f32>>) -> bool {
        if pairs.len() < 3 {
            return false;
        }

        let Some(mut model) = fit_affine(pairs) else {
            warn!("affine fit: normal equations are singular");
            return false;
        };

        self.inliers.clear();
        self.inliers.extend(pairs.iter().copied().filter(|p| {
            distance_sq(transform_point(&model, p.key), p.curr) <= self.inlier_threshold_sq
        }));

        // one refit over the inlier set tightens the estimate
        if self.inliers.len() >= 3 && self.inliers.len() < pairs.len() {
            if let Some(refined) = fit_affine(&self.inliers) {
                model = refined;
            }
        }

        self.model = model;
        true
    }

    fn model(&self) -> Matrix3<f32> {
        self.model
    }

    fn match_set(&self) -> &[AssociatedPair] {
        &self.inliers
    }
}
