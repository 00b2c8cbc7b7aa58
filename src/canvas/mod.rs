// Canvas controller: turns a pointer drag stream into layout previews and edits.

pub mod gesture;
pub mod zone;

use crate::audio::DropSound;
use crate::config::palette::Color;
use crate::geometry::{split, Axis, Point, Rect, Size};
use crate::layout::{Node, NodeId, Stack, Tile};

use zone::resolve_zone;

/// What the renderer needs to draw one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    pub rect: Rect,
    pub color: Color,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            rect: tile.rect,
            color: tile.color,
        }
    }
}

/// Drag-and-drop state of the canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A payload was picked from the palette but has no place on the canvas yet.
    FromPalette { payload: Tile },
    /// The payload has a provisional rect on the canvas and is previewed.
    OverCanvas { payload: Tile },
}

impl DragState {
    pub fn payload(&self) -> Option<&Tile> {
        match self {
            DragState::Idle => None,
            DragState::FromPalette { payload } | DragState::OverCanvas { payload } => Some(payload),
        }
    }
}

/// The tile under the pointer and the stack that directly holds it.
#[derive(Debug, Clone, Copy)]
struct DropTarget {
    tile: NodeId,
    tile_rect: Rect,
    tile_index: usize,
    stack: NodeId,
    stack_rect: Rect,
    stack_axis: Axis,
    stack_len: usize,
    stack_is_root: bool,
}

/// How a drop at a given location reshapes the tree.
#[derive(Debug, Clone, PartialEq)]
enum Placement {
    /// Add the payload to the touched stack at `index`. `slots` is the
    /// stack's rect re-split for one more child.
    Sibling { index: usize, slots: Vec<Rect> },
    /// Split the touched tile in two along `axis`. The payload takes
    /// `halves[payload_half]`, the tile keeps the other half.
    Split {
        axis: Axis,
        halves: Vec<Rect>,
        payload_half: usize,
    },
}

/// Decide the placement for a drop at `location` on `target`.
/// Returns None when the location falls in no slot.
fn plan(target: &DropTarget, location: Point) -> Option<Placement> {
    let tile_axis = resolve_zone(target.tile_rect, location).axis()?;
    if tile_axis == target.stack_axis {
        let slots = split(target.stack_rect, target.stack_len + 1, target.stack_axis);
        let index = slots.iter().position(|slot| slot.contains_point(location))?;
        Some(Placement::Sibling { index, slots })
    } else {
        let halves = split(target.tile_rect, 2, tile_axis);
        let payload_half = halves.iter().position(|half| half.contains_point(location))?;
        Some(Placement::Split {
            axis: tile_axis,
            halves,
            payload_half,
        })
    }
}

/// Owns the layout tree and the in-progress drag payload.
#[derive(Debug)]
pub struct CanvasController {
    root: Stack,
    canvas_size: Size,
    drag: DragState,
    sound: DropSound,
}

impl CanvasController {
    /// Create a controller with an empty canvas.
    pub fn new(sound: DropSound) -> Self {
        Self {
            root: Stack::new(Axis::Horizontal),
            canvas_size: Size::default(),
            drag: DragState::Idle,
            sound,
        }
    }

    /// The root stack. Its rect is the canvas rect.
    pub fn root(&self) -> &Stack {
        &self.root
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::from_size(self.canvas_size)
    }

    pub fn is_muted(&self) -> bool {
        self.sound.is_muted()
    }

    /// Record the canvas size and lay the tree out for it.
    pub fn set_canvas_size(&mut self, size: Size) {
        log::info!("Canvas size: {}x{}", size.width, size.height);
        self.canvas_size = size;
        self.refresh();
    }

    /// Committed tiles in render order, including any preview re-flow.
    pub fn current_tiles(&self) -> Vec<TileView> {
        self.root.tiles().into_iter().map(TileView::from).collect()
    }

    /// The payload being dragged, once it has a place on the canvas.
    pub fn current_preview_tile(&self) -> Option<TileView> {
        match &self.drag {
            DragState::OverCanvas { payload } => Some(TileView::from(payload)),
            _ => None,
        }
    }

    /// True when no tile has been committed.
    pub fn is_empty(&self) -> bool {
        self.root.tiles().is_empty()
    }

    /// Pointer moved inside the canvas while holding `color`.
    ///
    /// The first call only arms the drag. Later calls place the payload and
    /// re-flow the neighbours it would displace, without changing the tree's
    /// structure.
    pub fn drag_inside(&mut self, color: Color, location: Point) {
        let (mut payload, was_over) = match std::mem::take(&mut self.drag) {
            DragState::Idle => {
                log::debug!("Drag armed");
                self.drag = DragState::FromPalette {
                    payload: Tile::new(Rect::ZERO, color),
                };
                return;
            }
            DragState::FromPalette { payload } => (payload, false),
            DragState::OverCanvas { payload } => (payload, true),
        };

        let placed = self.preview(&mut payload, location);
        self.drag = if placed || was_over {
            DragState::OverCanvas { payload }
        } else {
            DragState::FromPalette { payload }
        };
    }

    /// Apply a provisional placement for `payload`. Returns true if the
    /// payload received a rect.
    fn preview(&mut self, payload: &mut Tile, location: Point) -> bool {
        if self.is_empty() {
            payload.rect = self.canvas_rect();
            return true;
        }
        let Some(target) = self.drop_target(location) else {
            log::debug!("Drag over empty canvas area at ({}, {})", location.x, location.y);
            return false;
        };
        let Some(placement) = plan(&target, location) else {
            return false;
        };

        match placement {
            Placement::Sibling { index, mut slots } => {
                payload.rect = slots.remove(index);
                if let Some(stack) = self.root.stack_mut(target.stack) {
                    stack.place_children(&slots);
                }
                log::debug!("Preview: sibling slot {index} of {}", target.stack_len + 1);
            }
            Placement::Split {
                axis,
                halves,
                payload_half,
            } => {
                payload.rect = halves[payload_half];
                if let Some(tile) = self.root.tile_mut(target.tile) {
                    tile.rect = halves[1 - payload_half];
                }
                // The first split of a lone tile sets the canvas orientation.
                if target.stack_is_root && target.stack_len == 1 {
                    if let Some(root_axis) = resolve_zone(target.stack_rect, location).axis() {
                        self.root.set_axis(root_axis);
                    }
                }
                log::debug!("Preview: split tile {:?} along {axis:?}", target.tile);
            }
        }
        true
    }

    /// Pointer left the canvas: drop the payload and restore the layout.
    pub fn drag_outside(&mut self) {
        if self.drag != DragState::Idle {
            log::debug!("Drag left canvas, preview discarded");
        }
        self.drag = DragState::Idle;
        self.refresh();
    }

    /// Pointer released at `location`: commit the payload into the tree.
    pub fn end_dragging(&mut self, location: Point) {
        let committed = match std::mem::take(&mut self.drag) {
            DragState::Idle => false,
            DragState::FromPalette { payload } | DragState::OverCanvas { payload } => {
                self.commit(&payload, location)
            }
        };
        self.refresh();
        if committed {
            log::info!("Tile dropped, {} tiles on canvas", self.root.tiles().len());
            self.sound.play();
        }
    }

    fn commit(&mut self, payload: &Tile, location: Point) -> bool {
        if self.is_empty() {
            self.root.add_tile(payload, self.root.len());
            return true;
        }
        let Some(target) = self.drop_target(location) else {
            log::debug!("Drop over empty canvas area ignored");
            return false;
        };
        let Some(placement) = plan(&target, location) else {
            return false;
        };
        let Some(stack) = self.root.stack_mut(target.stack) else {
            return false;
        };

        match placement {
            Placement::Sibling { index, .. } => {
                stack.add_tile(payload, index);
            }
            Placement::Split {
                axis, payload_half, ..
            } => {
                let Some(touched) = stack.remove_child(target.tile_index) else {
                    return false;
                };
                let dropped = Node::Tile(payload.duplicate());
                let children = if payload_half == 0 {
                    vec![dropped, touched]
                } else {
                    vec![touched, dropped]
                };
                let wrapper = Stack::with_children(children, axis, target.tile_rect);
                stack.add_stack(&wrapper, target.tile_index);
            }
        }
        true
    }

    /// Remove every tile.
    pub fn reset(&mut self) {
        log::info!("Canvas reset");
        self.root.clear();
        self.refresh();
    }

    pub fn set_mute(&mut self, muted: bool) {
        log::info!("Drop sound {}", if muted { "muted" } else { "unmuted" });
        self.sound.set_mute(muted);
    }

    /// Lay the whole tree out for the current canvas.
    fn refresh(&mut self) {
        let canvas = self.canvas_rect();
        self.root.collect_tiles(canvas);
    }

    /// Find the tile under `location` and its parent stack, with rects
    /// freshly computed for the current canvas.
    fn drop_target(&mut self, location: Point) -> Option<DropTarget> {
        let canvas = self.canvas_rect();
        let tiles = self.root.collect_tiles(canvas);
        let touched = tiles.iter().find(|tile| tile.rect.contains_point(location))?;
        let root_id = self.root.id();
        self.root
            .collect_stacks_with_rect(canvas)
            .into_iter()
            .find_map(|(stack, stack_rect)| {
                let tile_index = stack.position_of(touched.id())?;
                Some(DropTarget {
                    tile: touched.id(),
                    tile_rect: touched.rect,
                    tile_index,
                    stack: stack.id(),
                    stack_rect,
                    stack_axis: stack.axis(),
                    stack_len: stack.len(),
                    stack_is_root: stack.id() == root_id,
                })
            })
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new(DropSound::silent())
    }
}
