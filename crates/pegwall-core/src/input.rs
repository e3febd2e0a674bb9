//! Pointer and keyboard input, and picking rays against the wall plane.

use crate::furniture::InstanceId;
use crate::units::units_to_inches;
use glam::{DMat4, DVec3};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Key name that aborts a drag.
pub const ESCAPE_KEY: &str = "Escape";

/// Default depth of the wall plane in scene units.
pub const DEFAULT_WALL_Z: f64 = -2.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A ray in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    /// Normalized direction.
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Build a picking ray from normalized device coordinates (`-1..=1` on
    /// both axes, y up) and the inverse of the camera's view-projection.
    pub fn from_ndc(ndc: Point, inverse_view_projection: DMat4) -> Self {
        let near = inverse_view_projection.project_point3(DVec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse_view_projection.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));
        Self::new(near, far - near)
    }

    /// Normalized device coordinates of a pixel inside a viewport.
    pub fn ndc_from_pixels(pixel: Point, viewport_width: f64, viewport_height: f64) -> Point {
        Point::new(
            pixel.x / viewport_width * 2.0 - 1.0,
            -(pixel.y / viewport_height) * 2.0 + 1.0,
        )
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// The plane the wall sits on, perpendicular to the z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlane {
    /// Depth of the plane in scene units.
    pub z: f64,
}

impl Default for WallPlane {
    fn default() -> Self {
        Self { z: DEFAULT_WALL_Z }
    }
}

impl WallPlane {
    pub fn new(z: f64) -> Self {
        Self { z }
    }

    /// Where the ray hits the plane, in scene units.
    ///
    /// Returns `None` for rays parallel to the wall or pointing away from it.
    pub fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        if ray.direction.z.abs() < 1e-12 {
            return None;
        }
        let t = (self.z - ray.origin.z) / ray.direction.z;
        (t >= 0.0).then(|| ray.at(t))
    }

    /// Where the ray hits the wall, in wall-local inches.
    pub fn wall_point(&self, ray: &Ray) -> Option<Point> {
        self.intersect(ray)
            .map(|hit| Point::new(units_to_inches(hit.x), units_to_inches(hit.y)))
    }

    /// Depth of the plane in inches, used as the z of placed items.
    pub fn z_inches(&self) -> f64 {
        units_to_inches(self.z)
    }
}

/// Pointer events relevant to dragging.
///
/// Move and up events are document-wide; down events carry the item under
/// the pointer, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        target: Option<InstanceId>,
        button: MouseButton,
    },
    Move {
        ray: Ray,
    },
    Up {
        button: MouseButton,
    },
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    pub fn is_escape(&self) -> bool {
        matches!(self, KeyEvent::Pressed(key) if key == ESCAPE_KEY)
    }
}
