//! Furniture geometry derived from peg-hole spans.

use crate::grid::{PEG_HOLE_SIZE, PEG_HOLE_SPACING};

/// Width in inches of an item spanning `horizontal_span` peg holes.
///
/// Each spanned hole contributes its own width, plus the spacing between
/// consecutive holes. A span of zero is a caller error.
pub fn furniture_width_inches(horizontal_span: u32) -> f64 {
    let span = f64::from(horizontal_span);
    span * PEG_HOLE_SIZE.width + (span - 1.0) * PEG_HOLE_SPACING.width
}

/// Height in inches of an item.
///
/// The catalog height is used as-is; spans do not affect height.
pub fn furniture_height_inches(
    _vertical_span: u32,
    _horizontal_span: u32,
    base_height: f64,
) -> f64 {
    base_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hole_width() {
        assert_eq!(furniture_width_inches(1), 1.0);
    }

    #[test]
    fn test_known_widths() {
        assert_eq!(furniture_width_inches(2), 10.0);
        assert_eq!(furniture_width_inches(3), 19.0);
        assert_eq!(furniture_width_inches(4), 28.0);
    }

    #[test]
    fn test_width_strictly_increasing() {
        let widths: Vec<f64> = (1..=25).map(furniture_width_inches).collect();
        for pair in widths.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_height_ignores_vertical_span() {
        // Vertical span does not feed into geometry; this pins current behaviour.
        assert_eq!(furniture_height_inches(1, 2, 10.0), 10.0);
        assert_eq!(furniture_height_inches(4, 2, 10.0), 10.0);
        assert_eq!(furniture_height_inches(9, 9, 29.0), 29.0);
    }
}
