//! Furniture definitions and placed instances.

use crate::error::{PegwallError, Result};
use crate::grid::PEG_HOLE_SIZE;
use crate::sizing::{furniture_height_inches, furniture_width_inches};
use crate::units::Dimensions;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(PegwallError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PegwallError::InvalidColor(hex.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#RRGGBB` (alpha is dropped when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Material a product is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Plywood,
    Oak,
    Walnut,
    Maple,
    Metal,
}

/// Which visual component renders an item.
///
/// Only renderers look at this; placement treats every kind the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Cubby,
    Bookshelf,
    MagazineRack,
    Table,
    Hook,
    Easel,
    PaperTowels,
}

impl FurnitureKind {
    /// Vertical offset (inches) the renderer applies above the anchor.
    pub fn default_vertical_offset(self) -> f64 {
        match self {
            // Hooks hang from the top of their peg hole.
            FurnitureKind::Hook => PEG_HOLE_SIZE.height,
            _ => 0.0,
        }
    }
}

/// Number of peg holes an item covers on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegSpan {
    pub horizontal: u32,
    pub vertical: u32,
}

impl PegSpan {
    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Catalog-level definition of a piece of furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSpec {
    pub id: String,
    pub name: String,
    pub kind: FurnitureKind,
    /// Nominal catalog dimensions, in inches.
    pub dimensions: Dimensions,
    pub color: SerializableColor,
    pub material: Material,
    /// Price in whole dollars.
    pub price: u32,
    pub peg_span: PegSpan,
    #[serde(default)]
    pub vertical_offset: f64,
}

impl FurnitureSpec {
    /// Width on the wall, derived from the horizontal span.
    pub fn width_inches(&self) -> f64 {
        furniture_width_inches(self.peg_span.horizontal)
    }

    /// Height on the wall.
    pub fn height_inches(&self) -> f64 {
        furniture_height_inches(
            self.peg_span.vertical,
            self.peg_span.horizontal,
            self.dimensions.height,
        )
    }

    /// Footprint on the wall in inches.
    pub fn footprint(&self) -> Size {
        Size::new(self.width_inches(), self.height_inches())
    }

    /// Footprint rectangle when anchored at `origin`.
    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.footprint())
    }
}

/// Identifier of a placed item, unique within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog item placed on the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub instance_id: InstanceId,
    #[serde(flatten)]
    pub spec: FurnitureSpec,
    /// `[x, y, z]` in wall-local inches. `(x, y)` is the anchor corner of
    /// the footprint; `z` is the wall plane.
    pub position: [f64; 3],
}

impl PlacedItem {
    pub fn new(instance_id: InstanceId, spec: FurnitureSpec, origin: Point, z: f64) -> Self {
        Self {
            instance_id,
            spec,
            position: [origin.x, origin.y, z],
        }
    }

    /// The anchor corner on the wall.
    pub fn origin(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }

    /// Move the anchor corner, keeping the wall plane.
    pub fn set_origin(&mut self, origin: Point) {
        self.position[0] = origin.x;
        self.position[1] = origin.y;
    }

    /// Same item at a different anchor.
    pub fn with_origin(&self, origin: Point) -> Self {
        let mut moved = self.clone();
        moved.set_origin(origin);
        moved
    }

    /// Footprint rectangle on the wall.
    pub fn rect(&self) -> Rect {
        self.spec.rect_at(self.origin())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A plain plywood cubby with the given span and height.
    pub fn spec(span: PegSpan, height: f64) -> FurnitureSpec {
        FurnitureSpec {
            id: format!("test-{}x{}", span.horizontal, span.vertical),
            name: "Test Cubby".to_string(),
            kind: FurnitureKind::Cubby,
            dimensions: Dimensions::new(furniture_width_inches(span.horizontal), height, 10.0),
            color: SerializableColor::new(245, 245, 220, 255),
            material: Material::Plywood,
            price: 100,
            peg_span: span,
            vertical_offset: 0.0,
        }
    }

    pub fn placed(id: &str, spec: FurnitureSpec, x: f64, y: f64) -> PlacedItem {
        PlacedItem::new(InstanceId::new(id), spec, Point::new(x, y), 0.0)
    }
}
