//! Conversion between physical inches and scene units.
//!
//! The scene uses one unit per foot. Conversions are plain multiplication
//! and division with no rounding, because drag handling converts back and
//! forth on every pointer move.

use serde::{Deserialize, Serialize};

/// Inches per scene unit.
pub const INCHES_PER_UNIT: f64 = 12.0;

/// Convert inches to scene units.
pub fn inches_to_units(inches: f64) -> f64 {
    inches / INCHES_PER_UNIT
}

/// Convert scene units to inches.
pub fn units_to_inches(units: f64) -> f64 {
    units * INCHES_PER_UNIT
}

/// Physical width/height/depth of a piece of furniture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Convert every axis from inches to scene units.
    pub fn to_units(self) -> Self {
        Self {
            width: inches_to_units(self.width),
            height: inches_to_units(self.height),
            depth: inches_to_units(self.depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foot_conversion() {
        assert_eq!(inches_to_units(12.0), 1.0);
        assert_eq!(units_to_inches(1.5), 18.0);
    }

    #[test]
    fn test_round_trip_does_not_drift() {
        let mut value = 37.25;
        for _ in 0..1000 {
            value = units_to_inches(inches_to_units(value));
        }
        assert!((value - 37.25).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_to_units() {
        let dims = Dimensions::new(24.0, 6.0, 18.0).to_units();
        assert_eq!(dims, Dimensions::new(2.0, 0.5, 1.5));
    }
}
