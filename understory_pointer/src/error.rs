// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// A raw sample that cannot be tracked.
///
/// Returned by [`ContactSet::update`](crate::ContactSet::update) before any state is
/// touched, so a rejected update leaves the previous frame intact.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// The sample's position has a NaN or infinite coordinate.
    #[error("sample {index} has a non-finite position ({x}, {y})")]
    NonFinitePosition {
        /// Index of the offending sample within its event.
        index: usize,
        /// Horizontal coordinate as received.
        x: f64,
        /// Vertical coordinate as received.
        y: f64,
    },
}

/// Surface geometry that cannot be used for projection.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// The surface bounds have zero (or non-finite) width or height.
    #[error("surface bounds {width}x{height} have no area")]
    EmptyBounds {
        /// Width of the bounds.
        width: f64,
        /// Height of the bounds.
        height: f64,
    },
    /// The viewport has zero (or non-finite) width or height.
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport {
        /// Width of the viewport.
        width: f64,
        /// Height of the viewport.
        height: f64,
    },
}
