//! Peg-hole grid derived from the wall dimensions.

use crate::error::{PegwallError, Result};
use crate::units::inches_to_units;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Distance between peg hole centres, in inches.
pub const PEG_HOLE_SPACING: Size = Size::new(8.0, 6.0);

/// Size of a single peg hole, in inches.
pub const PEG_HOLE_SIZE: Size = Size::new(1.0, 3.0);

/// Total edge margin the product keeps around the grid (3" each side).
pub const HORIZONTAL_MARGIN: f64 = 6.0;

/// Total edge margin the product keeps around the grid (2" top and bottom).
pub const VERTICAL_MARGIN: f64 = 4.0;

/// Longest wall side accepted, in inches (100').
pub const MAX_WALL_INCHES: f64 = 1200.0;

/// Physical wall dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub width_inches: f64,
    pub height_inches: f64,
}

impl Default for WallSpec {
    fn default() -> Self {
        // 8' x 8'
        Self {
            width_inches: 96.0,
            height_inches: 96.0,
        }
    }
}

impl WallSpec {
    /// Create a wall, rejecting non-positive dimensions and sides longer
    /// than [`MAX_WALL_INCHES`].
    pub fn new(width_inches: f64, height_inches: f64) -> Result<Self> {
        let in_range = |length: f64| length > 0.0 && length <= MAX_WALL_INCHES;
        if !(in_range(width_inches) && in_range(height_inches)) {
            return Err(PegwallError::InvalidWall {
                width: width_inches,
                height: height_inches,
            });
        }
        Ok(Self {
            width_inches,
            height_inches,
        })
    }

    /// Create a wall from dimensions in feet.
    pub fn from_feet(width_feet: f64, height_feet: f64) -> Result<Self> {
        Self::new(width_feet * 12.0, height_feet * 12.0)
    }

    /// Create a wall from the dimension form's separate feet and inches fields.
    pub fn from_feet_inches(
        width_feet: u32,
        width_inches: u32,
        height_feet: u32,
        height_inches: u32,
    ) -> Result<Self> {
        Self::new(
            f64::from(width_feet) * 12.0 + f64::from(width_inches),
            f64::from(height_feet) * 12.0 + f64::from(height_inches),
        )
    }

    /// The wall that exactly fits the given number of holes.
    pub fn from_hole_counts(horizontal: u32, vertical: u32) -> Self {
        Self {
            width_inches: f64::from(horizontal) * PEG_HOLE_SPACING.width + HORIZONTAL_MARGIN,
            height_inches: f64::from(vertical) * PEG_HOLE_SPACING.height + VERTICAL_MARGIN,
        }
    }

    /// Number of (horizontal, vertical) holes on this wall.
    pub fn hole_counts(&self) -> (usize, usize) {
        (
            hole_count(self.width_inches, HORIZONTAL_MARGIN, PEG_HOLE_SPACING.width),
            hole_count(self.height_inches, VERTICAL_MARGIN, PEG_HOLE_SPACING.height),
        )
    }

    /// Wall dimensions in feet, as the hand-off blob stores them.
    pub fn to_feet(self) -> Size {
        Size::new(self.width_inches / 12.0, self.height_inches / 12.0)
    }

    /// Wall dimensions in scene units.
    pub fn to_units(self) -> Size {
        Size::new(
            inches_to_units(self.width_inches),
            inches_to_units(self.height_inches),
        )
    }
}

fn hole_count(length: f64, margin: f64, spacing: f64) -> usize {
    // Walls built from the public fields skip the `WallSpec::new` limit.
    let length = if length > MAX_WALL_INCHES { MAX_WALL_INCHES } else { length };
    let count = ((length - margin) / spacing).round();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Hole centre positions in wall-local inches, ascending on both axes.
///
/// `xs` is centred on the wall (x = 0 is the wall's centre line),
/// `ys` is measured up from the floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PegGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl PegGrid {
    /// Whether either axis has no holes (nothing can be placed).
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() || self.ys.is_empty()
    }

    /// Total number of holes.
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }
}

/// Compute the peg-hole centres for a wall.
pub fn compute_grid(wall: &WallSpec) -> PegGrid {
    let (h_count, v_count) = wall.hole_counts();

    let h_margin = (wall.width_inches - h_count as f64 * PEG_HOLE_SPACING.width) / 2.0;
    let v_margin = (wall.height_inches - v_count as f64 * PEG_HOLE_SPACING.height) / 2.0;

    let xs = (0..h_count)
        .map(|i| {
            -wall.width_inches / 2.0
                + h_margin
                + i as f64 * PEG_HOLE_SPACING.width
                + PEG_HOLE_SPACING.width / 2.0
        })
        .collect();
    let ys = (0..v_count)
        .map(|j| v_margin + j as f64 * PEG_HOLE_SPACING.height + PEG_HOLE_SPACING.height / 2.0)
        .collect();

    PegGrid { xs, ys }
}
