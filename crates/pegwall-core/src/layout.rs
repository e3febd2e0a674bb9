//! The wall being designed and everything placed on it.
//!
//! [`WallLayout`] is the single owner of layout state. Renderers read an
//! immutable [`LayoutSnapshot`]; the item list inside it is shared and is
//! replaced wholesale on every change, so a snapshot never changes under
//! its reader.

use crate::config::PlannerConfig;
use crate::drag::{CursorStyle, DragController, DragEvent};
use crate::error::Result;
use crate::furniture::{FurnitureSpec, InstanceId, PlacedItem};
use crate::grid::WallSpec;
use crate::input::{KeyEvent, MouseButton, PointerEvent, Ray, WallPlane};
use crate::placement::{Placement, first_open_anchor, is_valid, place};
use crate::pricing::Quote;
use crate::storage::Storage;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use web_time::{SystemTime, UNIX_EPOCH};

/// Wall size in feet, as stored in the hand-off blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDimensions {
    pub width: f64,
    pub height: f64,
}

/// The hand-off blob read by the print view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLayout {
    pub id: String,
    pub wall_dimensions: WallDimensions,
    pub placed_items: Vec<PlacedItem>,
}

impl SavedLayout {
    /// Capture a wall and its items under a fresh id.
    pub fn new(wall: WallSpec, placed_items: Vec<PlacedItem>) -> Self {
        let feet = wall.to_feet();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            wall_dimensions: WallDimensions {
                width: feet.width,
                height: feet.height,
            },
            placed_items,
        }
    }

    pub fn wall(&self) -> Result<WallSpec> {
        WallSpec::from_feet(self.wall_dimensions.width, self.wall_dimensions.height)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Read-only view of the layout for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub wall: WallSpec,
    pub items: Arc<[PlacedItem]>,
    pub selected: Option<InstanceId>,
    /// Items currently shown with overlap feedback.
    pub overlapping: HashSet<InstanceId>,
    pub dragging: Option<InstanceId>,
    pub cursor: CursorStyle,
}

impl LayoutSnapshot {
    pub fn is_selected(&self, id: &InstanceId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn is_overlapping(&self, id: &InstanceId) -> bool {
        self.overlapping.contains(id)
    }
}

/// A wall plus the furniture on it.
#[derive(Debug, Clone)]
pub struct WallLayout {
    wall: WallSpec,
    items: Arc<[PlacedItem]>,
    selected: Option<InstanceId>,
    overlapping: HashSet<InstanceId>,
    drag: DragController,
}

impl Default for WallLayout {
    fn default() -> Self {
        Self::new(WallSpec::default())
    }
}

impl WallLayout {
    /// An empty layout on the given wall.
    pub fn new(wall: WallSpec) -> Self {
        Self {
            wall,
            items: Arc::from(Vec::new()),
            selected: None,
            overlapping: HashSet::new(),
            drag: DragController::default(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.default_wall).with_wall_plane(config.wall_plane())
    }

    pub fn with_wall_plane(mut self, wall_plane: WallPlane) -> Self {
        self.drag = DragController::new(wall_plane);
        self
    }

    pub fn wall(&self) -> WallSpec {
        self.wall
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn item(&self, id: &InstanceId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| &item.instance_id == id)
    }

    pub fn selected(&self) -> Option<&InstanceId> {
        self.selected.as_ref()
    }

    pub fn is_overlapping(&self, id: &InstanceId) -> bool {
        self.overlapping.contains(id)
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            wall: self.wall,
            items: Arc::clone(&self.items),
            selected: self.selected.clone(),
            overlapping: self.overlapping.clone(),
            dragging: self.drag.dragging().cloned(),
            cursor: self.drag.cursor(),
        }
    }

    /// Place a new item at the first open anchor and select it.
    ///
    /// On a full wall the item still gets added, at the fallback position
    /// and flagged as overlapping.
    pub fn add_item(&mut self, spec: FurnitureSpec) -> InstanceId {
        let placement = match first_open_anchor(&spec, &self.wall, &self.items) {
            Some(position) => Placement {
                position,
                overlapping: false,
            },
            None => place(&spec, Point::ZERO, &self.wall, &self.items),
        };

        let instance_id = self.unique_id(&spec.name);
        log::info!(
            "Added {} at ({}, {}){}",
            instance_id,
            placement.position.x,
            placement.position.y,
            if placement.overlapping { " overlapping" } else { "" }
        );

        let item = PlacedItem::new(
            instance_id.clone(),
            spec,
            placement.position,
            self.drag.wall_plane().z_inches(),
        );
        let mut items = self.items.to_vec();
        items.push(item);
        self.items = items.into();

        self.set_overlapping(&instance_id, placement.overlapping);
        self.selected = Some(instance_id.clone());
        instance_id
    }

    /// Move an item's anchor directly. Returns false for unknown ids.
    pub fn move_item(&mut self, id: &InstanceId, position: Point) -> bool {
        if !self.commit_position(id, position) {
            return false;
        }
        let overlapping = self
            .item(id)
            .is_some_and(|item| !is_valid(item, &self.wall, &self.items));
        self.set_overlapping(id, overlapping);
        true
    }

    /// Remove an item, clearing the selection and ending the drag if they
    /// refer to it. The events hold the `DragEnded` of an interrupted drag.
    pub fn remove_item(&mut self, id: &InstanceId) -> Option<(PlacedItem, Vec<DragEvent>)> {
        let index = self.items.iter().position(|item| &item.instance_id == id)?;
        let mut items = self.items.to_vec();
        let removed = items.remove(index);
        self.items = items.into();

        self.overlapping.remove(id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let events = if self.drag.dragging() == Some(id) {
            self.drag.end_drag()
        } else {
            Vec::new()
        };
        log::info!("Removed {}", id);
        Some((removed, events))
    }

    /// Remove every item. Returns the `DragEnded` of an interrupted drag.
    pub fn clear_wall(&mut self) -> Vec<DragEvent> {
        let events = self.drag.end_drag();
        self.items = Arc::from(Vec::new());
        self.selected = None;
        self.overlapping.clear();
        events
    }

    /// Change the wall size. Placed items keep their positions, even if
    /// they no longer fit.
    pub fn set_wall(&mut self, wall: WallSpec) {
        log::info!(
            "Wall resized to {}\" x {}\"",
            wall.width_inches,
            wall.height_inches
        );
        self.wall = wall;
    }

    /// Select an item, or clear the selection with `None`. Unknown ids are
    /// ignored.
    pub fn select(&mut self, id: Option<InstanceId>) -> bool {
        match id {
            Some(id) if self.item(&id).is_none() => false,
            id => {
                self.selected = id;
                true
            }
        }
    }

    pub fn pointer_down(&mut self, target: Option<InstanceId>) -> Vec<DragEvent> {
        self.handle_pointer_event(&PointerEvent::Down {
            target,
            button: MouseButton::Left,
        })
    }

    pub fn pointer_move(&mut self, ray: Ray) -> Vec<DragEvent> {
        self.handle_pointer_event(&PointerEvent::Move { ray })
    }

    pub fn pointer_up(&mut self) -> Vec<DragEvent> {
        self.handle_pointer_event(&PointerEvent::Up {
            button: MouseButton::Left,
        })
    }

    pub fn key_down(&mut self, key: &str) -> Vec<DragEvent> {
        self.handle_key_event(&KeyEvent::Pressed(key.to_string()))
    }

    /// Feed a pointer event to the drag controller and apply the result.
    ///
    /// Pointer-down on an id that is not on the wall is ignored.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> Vec<DragEvent> {
        if let PointerEvent::Down {
            target: Some(id), ..
        } = event
        {
            if self.item(id).is_none() {
                log::debug!("Ignoring pointer-down on unknown item {}", id);
                return Vec::new();
            }
        }
        let events = self.drag.handle_pointer_event(event, &self.wall, &self.items);
        self.apply(&events);
        events
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Vec<DragEvent> {
        let events = self.drag.handle_key_event(event);
        self.apply(&events);
        events
    }

    fn apply(&mut self, events: &[DragEvent]) {
        for event in events {
            match event {
                DragEvent::Selected(id) => self.selected = Some(id.clone()),
                DragEvent::Moved {
                    instance_id,
                    position,
                    overlapping,
                } => {
                    if self.commit_position(instance_id, *position) {
                        self.set_overlapping(instance_id, *overlapping);
                    }
                }
                DragEvent::DragStarted(_) | DragEvent::DragEnded(_) => {}
            }
        }
    }

    /// Copy the item list with one anchor changed.
    fn commit_position(&mut self, id: &InstanceId, position: Point) -> bool {
        let Some(index) = self.items.iter().position(|item| &item.instance_id == id) else {
            return false;
        };
        let mut items = self.items.to_vec();
        items[index].set_origin(position);
        self.items = items.into();
        true
    }

    fn set_overlapping(&mut self, id: &InstanceId, overlapping: bool) {
        if overlapping {
            self.overlapping.insert(id.clone());
        } else {
            self.overlapping.remove(id);
        }
    }

    /// `<name>-<unix millis>`, suffixed when that is already taken.
    fn unique_id(&self, name: &str) -> InstanceId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let base = format!("{}-{}", name, millis);

        let taken = |candidate: &str| {
            self.items
                .iter()
                .any(|item| item.instance_id.as_str() == candidate)
        };
        if !taken(&base) {
            return InstanceId::new(base);
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken(&candidate) {
                return InstanceId::new(candidate);
            }
            n += 1;
        }
    }

    /// Price of the wall and everything on it.
    pub fn quote(&self) -> Quote {
        Quote::new(&self.wall, &self.items)
    }

    pub fn to_saved(&self) -> SavedLayout {
        SavedLayout::new(self.wall, self.items.to_vec())
    }

    /// Restore a saved layout. Overlap flags are recomputed, nothing is
    /// selected.
    pub fn from_saved(saved: SavedLayout) -> Result<Self> {
        let mut layout = Self::new(saved.wall()?);
        layout.items = saved.placed_items.into();
        layout.overlapping = layout
            .items
            .iter()
            .filter(|item| !is_valid(item, &layout.wall, &layout.items))
            .map(|item| item.instance_id.clone())
            .collect();
        Ok(layout)
    }

    pub async fn save_to<S: Storage + ?Sized>(&self, storage: &S, key: &str) -> Result<()> {
        storage.save(key, &self.to_saved()).await?;
        log::debug!("Saved layout with {} items under {}", self.items.len(), key);
        Ok(())
    }

    pub async fn load_from<S: Storage + ?Sized>(storage: &S, key: &str) -> Result<Self> {
        let saved = storage.load(key).await?;
        Self::from_saved(saved)
    }

    /// Write the layout where the print view picks it up.
    pub async fn save_handoff<S: Storage + ?Sized>(
        &self,
        storage: &S,
        config: &PlannerConfig,
    ) -> Result<()> {
        self.save_to(storage, &config.storage_key).await
    }

    /// Read back the layout written by [`WallLayout::save_handoff`].
    pub async fn load_handoff<S: Storage + ?Sized>(
        storage: &S,
        config: &PlannerConfig,
    ) -> Result<Self> {
        Self::load_from(storage, &config.storage_key).await
    }
}
