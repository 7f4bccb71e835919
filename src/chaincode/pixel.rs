use std::fmt;

/// Integer pixel coordinate in a Y-up space
///
/// The derived hash combines both fields, so sets of pixels never collide
/// regardless of coordinate range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pixel {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate (grows upwards)
    pub y: i32,
}

impl Pixel {
    /// Create a pixel from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel shifted by the given offset, saturating at the `i32` range
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Pixel shifted by the given offset, `None` if a coordinate overflows
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Componentwise difference `self - origin`, saturating at the `i32` range
    pub const fn delta_from(self, origin: Self) -> [i32; 2] {
        [self.x.saturating_sub(origin.x), self.y.saturating_sub(origin.y)]
    }
}

impl From<[i32; 2]> for Pixel {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
