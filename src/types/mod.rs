//! Strongly-typed foundation types for safer APIs.
//!
//! This module provides the small value types the mesh core is built on,
//! keeping call sites self-documenting and preventing parameter mix-ups.
//!
//! # Design Philosophy
//!
//! - **Named fields over positional**: `Bounds2D { x_min, x_max, .. }` instead
//!   of a 4-tuple of reals
//! - **Named sides over index conventions**: `Side::Left` instead of "side 0"
//! - **Plain value semantics**: everything here is `Copy` or cheaply `Clone`
//!
//! # Example
//!
//! ```
//! use fem_mesh_rs::types::{Bounds2D, Side, Vector3};
//!
//! let bounds = Bounds2D::new(0.0, 2.0, 0.0, 1.0);
//! assert_eq!(bounds.width(), 2.0);
//! assert!(bounds.contains(1.0, 0.5));
//!
//! let p = Vector3::from_xy(1.0, 0.5);
//! assert_eq!(p.z, 0.0);
//!
//! assert_eq!(Side::Left.group_id(), 1);
//! ```

mod bounds;
mod sides;
mod vector3;

pub use bounds::{Bounds2D, Extent3};
pub use sides::Side;
pub use vector3::Vector3;
