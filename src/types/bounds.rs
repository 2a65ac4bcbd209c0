//! 2D domain bounds and 3D coordinate extents.

use std::fmt;

use crate::types::Vector3;

/// 2D rectangular domain bounds.
///
/// Stores the spatial extent of a rectangular domain with clear semantics
/// for each boundary. Construction does not validate; callers that require a
/// proper (non-degenerate, finite) rectangle check [`Bounds2D::is_valid`] and
/// report their own error.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::types::Bounds2D;
///
/// let bounds = Bounds2D::new(0.0, 2.0, 0.0, 1.0);
///
/// assert_eq!(bounds.width(), 2.0);
/// assert_eq!(bounds.height(), 1.0);
/// assert_eq!(bounds.center(), (1.0, 0.5));
/// assert!(bounds.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Minimum x-coordinate
    pub x_min: f64,
    /// Maximum x-coordinate
    pub x_max: f64,
    /// Minimum y-coordinate
    pub y_min: f64,
    /// Maximum y-coordinate
    pub y_max: f64,
}

impl Bounds2D {
    /// Create new domain bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Create a unit square [0, 1] × [0, 1].
    pub fn unit_square() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Create a square domain centered at origin.
    pub fn square(half_width: f64) -> Self {
        Self::new(-half_width, half_width, -half_width, half_width)
    }

    /// True if the rectangle is finite with positive width and height.
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
            && self.x_max > self.x_min
            && self.y_max > self.y_min
    }

    /// Domain width (x_max - x_min).
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Domain height (y_max - y_min).
    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Domain area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Domain center point.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Check if a point is inside the domain (inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Return bounds as tuple (x_min, x_max, y_min, y_max).
    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}] × [{:.2}, {:.2}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::unit_square()
    }
}

/// Axis-aligned extent of a set of 3D points, grown point by point.
///
/// Starts empty (min at `+inf`, max at `-inf`) so the first included point
/// initializes both corners.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::types::{Extent3, Vector3};
///
/// let mut extent = Extent3::empty();
/// extent.include(Vector3::new(1.0, -2.0, 0.0));
/// extent.include(Vector3::new(-1.0, 3.0, 0.0));
///
/// assert_eq!(extent.min.x, -1.0);
/// assert_eq!(extent.max.y, 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent3 {
    /// Componentwise minimum over included points
    pub min: Vector3,
    /// Componentwise maximum over included points
    pub max: Vector3,
}

impl Extent3 {
    /// An extent containing no points.
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Grow the extent to contain `point`.
    pub fn include(&mut self, point: Vector3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Extent of an iterator of points.
    pub fn from_points<I: IntoIterator<Item = Vector3>>(points: I) -> Self {
        let mut extent = Self::empty();
        for p in points {
            extent.include(p);
        }
        extent
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }
}

impl Default for Extent3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Extent3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x ∈ [{:.4}, {:.4}], y ∈ [{:.4}, {:.4}], z ∈ [{:.4}, {:.4}]",
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z
        )
    }
}
