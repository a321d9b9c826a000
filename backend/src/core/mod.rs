//! Timing for benchmark kernels

pub mod timing;
