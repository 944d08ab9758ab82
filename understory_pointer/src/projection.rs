// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of contacts into surface-local and normalized device coordinates.
//!
//! The tracking core is coordinate-system agnostic: it works in whatever space raw
//! samples arrive in. Renderers usually want one of two other spaces:
//!
//! - **Surface-local**: pixels of the render target, origin at the surface's
//!   top-left corner. The surface box may be scaled relative to its render target
//!   (for example a canvas with a device-pixel-ratio backing store).
//! - **NDC**: `[-1, 1]` on both axes with Y pointing up.
//!
//! Both maps are per-axis affine, so movement and distance stay consistent after
//! projection.
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_pointer::SurfaceProjection;
//!
//! // A 128x64 box backed by a 256x128 render target.
//! let proj = SurfaceProjection::new(Rect::new(16.0, 16.0, 144.0, 80.0), Size::new(256.0, 128.0)).unwrap();
//! assert_eq!(proj.local() * Point::new(80.0, 48.0), Point::new(128.0, 64.0));
//! assert_eq!(proj.ndc() * Point::new(16.0, 16.0), Point::new(-1.0, 1.0));
//! ```

use kurbo::{Affine, Rect, Size};

use crate::contact::Contact;
use crate::error::ProjectionError;

/// Supplies surface geometry on demand.
pub trait SurfaceGeometry {
    /// The surface's box in the input coordinate space.
    fn bounds(&self) -> Rect;
    /// Size of the surface's render target.
    fn viewport(&self) -> Size;
}

/// Fixed geometry, useful when the host already knows both values.
impl SurfaceGeometry for (Rect, Size) {
    fn bounds(&self) -> Rect {
        self.0
    }

    fn viewport(&self) -> Size {
        self.1
    }
}

/// Precomputed transforms for one surface geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceProjection {
    local: Affine,
    ndc: Affine,
}

impl SurfaceProjection {
    /// Build the transforms for `bounds` rendered into a `viewport`-sized target.
    pub fn new(bounds: Rect, viewport: Size) -> Result<Self, ProjectionError> {
        let (width, height) = (bounds.width(), bounds.height());
        if !has_area(width, height) {
            return Err(ProjectionError::EmptyBounds { width, height });
        }
        if !has_area(viewport.width, viewport.height) {
            return Err(ProjectionError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let sx = viewport.width / width;
        let sy = viewport.height / height;
        let local = Affine::new([sx, 0.0, 0.0, sy, -bounds.x0 * sx, -bounds.y0 * sy]);
        let to_ndc = Affine::new([
            2.0 / viewport.width,
            0.0,
            0.0,
            -2.0 / viewport.height,
            -1.0,
            1.0,
        ]);
        Ok(Self {
            local,
            ndc: to_ndc * local,
        })
    }

    /// Build from a geometry collaborator.
    pub fn from_geometry(geometry: &impl SurfaceGeometry) -> Result<Self, ProjectionError> {
        Self::new(geometry.bounds(), geometry.viewport())
    }

    /// Input space to surface-local pixels.
    pub fn local(&self) -> Affine {
        self.local
    }

    /// Input space to normalized device coordinates.
    pub fn ndc(&self) -> Affine {
        self.ndc
    }

    /// Project one contact into both spaces.
    pub fn project<T: Clone>(&self, contact: &Contact<T>) -> ProjectedContact<T> {
        ProjectedContact {
            local: contact.transformed(self.local),
            ndc: contact.transformed(self.ndc),
        }
    }
}

fn has_area(width: f64, height: f64) -> bool {
    width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()
}

/// A contact expressed in surface-local and normalized device coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedContact<T> {
    /// Surface-local pixels, origin top-left, Y down.
    pub local: Contact<T>,
    /// Normalized device coordinates, `[-1, 1]`, Y up.
    pub ndc: Contact<T>,
}
