//! Drag interaction for placed items.
//!
//! Turns a stream of pointer events into snapped position updates. The
//! controller owns no item data: every call receives the current wall and
//! item list and answers with events for the host to apply.

use crate::furniture::{InstanceId, PlacedItem};
use crate::grid::WallSpec;
use crate::input::{KeyEvent, PointerEvent, Ray, WallPlane};
use crate::placement::{fallback_position, is_valid, solve_position};
use kurbo::Point;

/// State of the drag interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// Waiting for a pointer-down on an item.
    #[default]
    Idle,
    /// An item follows the pointer.
    Dragging { instance_id: InstanceId },
}

/// Cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Grabbing,
}

/// Notifications produced by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// The item under the pointer became the selection.
    Selected(InstanceId),
    DragStarted(InstanceId),
    /// Commit a new anchor for the item. `overlapping` asks for visual
    /// feedback; the position is committed either way.
    Moved {
        instance_id: InstanceId,
        position: Point,
        overlapping: bool,
    },
    DragEnded(InstanceId),
}

/// Drag state machine for the items on one wall.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    cursor: CursorStyle,
    text_selection_suppressed: bool,
    wall_plane: WallPlane,
}

impl DragController {
    /// Create a controller picking against the given wall plane.
    pub fn new(wall_plane: WallPlane) -> Self {
        Self {
            wall_plane,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The item being dragged, if any.
    pub fn dragging(&self) -> Option<&InstanceId> {
        match &self.state {
            DragState::Dragging { instance_id } => Some(instance_id),
            DragState::Idle => None,
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Whether the host should suppress text selection while dragging.
    pub fn text_selection_suppressed(&self) -> bool {
        self.text_selection_suppressed
    }

    pub fn wall_plane(&self) -> WallPlane {
        self.wall_plane
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(
        &mut self,
        event: &PointerEvent,
        wall: &WallSpec,
        items: &[PlacedItem],
    ) -> Vec<DragEvent> {
        match event {
            PointerEvent::Down {
                target: Some(instance_id),
                ..
            } => self.pointer_down(instance_id.clone()),
            PointerEvent::Down { target: None, .. } => Vec::new(),
            PointerEvent::Move { ray } => self.pointer_move(ray, wall, items),
            PointerEvent::Up { .. } => self.end_drag(),
        }
    }

    /// Process a key event. Escape ends the drag, keeping the last
    /// committed position.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Vec<DragEvent> {
        if event.is_escape() {
            self.end_drag()
        } else {
            Vec::new()
        }
    }

    /// Start dragging an item. A drag already in progress ends first.
    pub fn pointer_down(&mut self, instance_id: InstanceId) -> Vec<DragEvent> {
        let mut events = self.end_drag();

        log::debug!("Drag started: {}", instance_id);
        self.state = DragState::Dragging {
            instance_id: instance_id.clone(),
        };
        self.cursor = CursorStyle::Grabbing;
        self.text_selection_suppressed = true;

        events.push(DragEvent::Selected(instance_id.clone()));
        events.push(DragEvent::DragStarted(instance_id));
        events
    }

    /// Follow a picking ray. Ignored when idle or when the ray misses the
    /// wall plane.
    pub fn pointer_move(
        &mut self,
        ray: &Ray,
        wall: &WallSpec,
        items: &[PlacedItem],
    ) -> Vec<DragEvent> {
        if !self.is_dragging() {
            return Vec::new();
        }
        match self.wall_plane.wall_point(ray) {
            Some(target) => self.drag_to(target, wall, items),
            None => Vec::new(),
        }
    }

    /// Snap the dragged item towards `target` (wall-local inches).
    pub fn drag_to(
        &mut self,
        target: Point,
        wall: &WallSpec,
        items: &[PlacedItem],
    ) -> Vec<DragEvent> {
        let Some(instance_id) = self.dragging().cloned() else {
            return Vec::new();
        };
        let Some(item) = items.iter().find(|item| item.instance_id == instance_id) else {
            log::warn!("Dragged item {} is no longer on the wall", instance_id);
            return self.end_drag();
        };

        let others: Vec<PlacedItem> = items
            .iter()
            .filter(|other| other.instance_id != item.instance_id)
            .cloned()
            .collect();
        let position = solve_position(&item.spec, target, wall, &others)
            .unwrap_or_else(|| fallback_position(&item.spec, wall));
        let overlapping = !is_valid(&item.with_origin(position), wall, items);

        vec![DragEvent::Moved {
            instance_id: item.instance_id.clone(),
            position,
            overlapping,
        }]
    }

    /// Stop dragging, if a drag is in progress.
    pub fn end_drag(&mut self) -> Vec<DragEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { instance_id } => {
                log::debug!("Drag ended: {}", instance_id);
                self.cursor = CursorStyle::Default;
                self.text_selection_suppressed = false;
                vec![DragEvent::DragEnded(instance_id)]
            }
            DragState::Idle => Vec::new(),
        }
    }
}
