//! Named sides of a rectangular domain.

use std::fmt;

/// One side of a rectangular domain.
///
/// Naming sides avoids the index conventions ("side 0 is bottom") that make
/// boundary handling error-prone. The declaration order left, right, bottom,
/// top is the order boundary elements and boundary groups are emitted in, and
/// fixes the canonical group ids 1 through 4.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::types::Side;
///
/// assert_eq!(Side::Left.name(), "left");
/// assert_eq!(Side::Top.group_id(), 4);
/// assert_eq!(Side::ALL[0], Side::Left);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// x = x_min
    Left,
    /// x = x_max
    Right,
    /// y = y_min
    Bottom,
    /// y = y_max
    Top,
}

impl Side {
    /// All four sides in boundary emission order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

    /// Canonical boundary group and node-set name for this side.
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Top => "top",
        }
    }

    /// Canonical boundary group and node-set id (1-based, emission order).
    pub fn group_id(self) -> usize {
        match self {
            Side::Left => 1,
            Side::Right => 2,
            Side::Bottom => 3,
            Side::Top => 4,
        }
    }

    /// True for the constant-x sides (left, right).
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
