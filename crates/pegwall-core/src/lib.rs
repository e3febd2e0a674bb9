//! Pegwall Core Library
//!
//! Placement, collision and drag logic for the pegwall furniture configurator.
//! Furniture hangs on a pegboard wall; this crate snaps it to the peg-hole
//! grid, keeps it on the wall and away from other items, and prices the result.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod drag;
pub mod error;
pub mod furniture;
pub mod grid;
pub mod input;
pub mod layout;
pub mod placement;
pub mod pricing;
pub mod sizing;
pub mod storage;
pub mod units;

pub use cache::{AssetCache, AssetLoader};
pub use catalog::{Catalog, FurnitureColor, FurnitureGroup, FurnitureVariant};
pub use config::PlannerConfig;
pub use drag::{CursorStyle, DragController, DragEvent, DragState};
pub use error::{PegwallError, Result};
pub use furniture::{
    FurnitureKind, FurnitureSpec, InstanceId, Material, PegSpan, PlacedItem, SerializableColor,
};
pub use grid::{PegGrid, WallSpec, compute_grid};
pub use input::{KeyEvent, MouseButton, PointerEvent, Ray, WallPlane};
pub use layout::{LayoutSnapshot, SavedLayout, WallLayout};
pub use placement::{Placement, fallback_position, is_valid, place, solve_position};
pub use pricing::{Quote, wall_price};
pub use sizing::{furniture_height_inches, furniture_width_inches};
pub use units::{Dimensions, inches_to_units, units_to_inches};
