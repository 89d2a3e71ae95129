//! Canvas positions.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default spacing of the snapping grid, in scene units.
pub const DEFAULT_GRID_SIZE: f64 = 60.0;

/// A point on the scene canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a position, rejecting NaN and infinite coordinates.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        Self::new(x, y).validated()
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns this position if it is finite, else
    /// [`Error::InvalidPosition`].
    pub fn validated(self) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::InvalidPosition {
                x: self.x,
                y: self.y,
            })
        }
    }

    /// Returns this position moved by the given delta.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the delta `(dx, dy)` from `origin` to this position.
    pub fn delta_from(self, origin: Position) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Returns this position snapped to the nearest grid intersection.
    ///
    /// A non-positive or non-finite grid size leaves the position unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use skilltree_core::Position;
    ///
    /// let p = Position::new(95.0, 29.0).snapped(60.0);
    /// assert_eq!(p, Position::new(120.0, 0.0));
    /// ```
    pub fn snapped(self, grid_size: f64) -> Self {
        if !(grid_size.is_finite() && grid_size > 0.0) {
            return self;
        }
        Self::new(
            (self.x / grid_size).round() * grid_size,
            (self.y / grid_size).round() * grid_size,
        )
    }

    /// Canonical persistence ordering: ascending `y`, then ascending `x`.
    pub fn layout_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}
