//! Separable convolution engines.
//!
//! `box_filter` is the dense whole-image path built on an incremental
//! running sum; `sparse` evaluates a general separable kernel at a single
//! coordinate. Both agree numerically where their domains overlap.
pub mod box_filter;
pub mod sparse;
